//! Error types for the health suggestion engine

use crate::schema::ValidationError;
use thiserror::Error;

/// Errors that can occur while analyzing a metric history
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Whether the error was caused by caller input rather than an internal fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::Validation(_) | AnalysisError::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(AnalysisError::from(ValidationError::EmptyMetrics).is_client_error());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(AnalysisError::from(json_err).is_client_error());

        assert!(!AnalysisError::Computation("nan mean".to_string()).is_client_error());
        assert!(!AnalysisError::Config("bad log level".to_string()).is_client_error());
    }

    #[test]
    fn test_validation_message_is_wrapped() {
        let err = AnalysisError::from(ValidationError::EmptyMetrics);
        assert_eq!(
            err.to_string(),
            "Validation error: At least one metric entry is required"
        );
    }
}
