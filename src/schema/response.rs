//! Response bodies for the service boundary

use crate::{SERVICE_NAME, SERVICE_TITLE, SERVICE_VERSION};
use serde::{Deserialize, Serialize};

/// Generic message returned for internal failures; never carries error details
pub const INTERNAL_ERROR_DETAIL: &str = "An internal error occurred. Please try again later.";

/// Liveness probe response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
        }
    }
}

/// Root route response describing the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub health: String,
    pub analyze: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: SERVICE_TITLE.to_string(),
            version: SERVICE_VERSION.to_string(),
            health: "/health".to_string(),
            analyze: "/analyze".to_string(),
        }
    }
}

/// Error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(INTERNAL_ERROR_DETAIL)
    }
}
