//! Health Suggest - Adaptive engine for daily health suggestions
//!
//! Turns a user's history of daily metrics (sleep, screen time, activity) into
//! actionable suggestions through a deterministic pipeline: day counting →
//! phase and confidence → personal statistics → blended thresholds → rule
//! evaluation.
//!
//! Early on, thresholds follow population priors. As distinct days accumulate,
//! they shift toward the user's own averages.
//!
//! ## Modules
//!
//! - **Engine**: [`HealthAnalyzer`] runs the pipeline over validated entries
//! - **Service**: [`SuggestionService`] maps requests to status codes and JSON bodies
//! - **Hosts**: the C ABI in [`ffi`] and the `suggest` CLI (feature `cli`)

pub mod analyzer;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod phase;
pub mod schema;
pub mod service;
pub mod stats;
pub mod suggestions;
pub mod thresholds;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use analyzer::{analyze_json, HealthAnalyzer};
pub use config::ServiceConfig;
pub use error::AnalysisError;
pub use service::{ServiceResponse, SuggestionService};
pub use suggestions::{SuggestionGenerator, SuggestionRule};

// Schema exports
pub use schema::{AnalyzeRequest, RawMetricEntry, ValidationError};

pub use types::{AnalysisResult, GlobalPriors, MetricEntry, Phase, StatsSummary};

/// Service version reported by the health and info routes
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the health route
pub const SERVICE_NAME: &str = "health-suggestion-service";

/// Human-readable title reported by the info route
pub const SERVICE_TITLE: &str = "Health Suggestion Microservice";
