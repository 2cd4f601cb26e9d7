//! Request/response schema
//!
//! This module defines the wire format accepted at the service boundary and the
//! single normalization step that turns raw entries into validated
//! [`MetricEntry`](crate::types::MetricEntry) values before the engine runs.

mod request;
mod response;

pub use request::*;
pub use response::*;
