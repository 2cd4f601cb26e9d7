//! Request/response boundary
//!
//! Transport-agnostic handlers for the three routes a host exposes:
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`SuggestionService::info`] |
//! | `GET /health` | [`SuggestionService::health`] |
//! | `POST /analyze` | [`SuggestionService::analyze`] |
//!
//! Caller mistakes become 4xx responses carrying the validation message.
//! Anything else becomes a 500 with a generic body; the real error is only logged.

use crate::analyzer::HealthAnalyzer;
use crate::config::ServiceConfig;
use crate::error::AnalysisError;
use crate::schema::{AnalyzeRequest, ErrorResponse, HealthResponse, ServiceInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// A status code plus JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Value,
}

impl ServiceResponse {
    pub fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self {
                status: STATUS_OK,
                body,
            },
            Err(e) => {
                error!(error = %e, "failed to serialize response body");
                Self::error(STATUS_INTERNAL_ERROR, ErrorResponse::internal())
            }
        }
    }

    pub fn error(status: u16, body: ErrorResponse) -> Self {
        Self {
            status,
            body: serde_json::json!({ "detail": body.detail }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// Service wrapping a shared analyzer
pub struct SuggestionService {
    analyzer: HealthAnalyzer,
}

impl Default for SuggestionService {
    fn default() -> Self {
        Self::new(HealthAnalyzer::new())
    }
}

impl SuggestionService {
    pub fn new(analyzer: HealthAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Build the service with priors taken from configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(HealthAnalyzer::with_priors(config.priors))
    }

    pub fn analyzer(&self) -> &HealthAnalyzer {
        &self.analyzer
    }

    /// Dispatch by method and path
    pub fn route(&self, method: &str, path: &str, body: &str) -> ServiceResponse {
        let path = path.trim_end_matches('/');
        let expected = match path {
            "" => "GET",
            "/health" => "GET",
            "/analyze" => "POST",
            _ => {
                return ServiceResponse::error(
                    STATUS_NOT_FOUND,
                    ErrorResponse::new(format!("Not found: {}", path)),
                )
            }
        };

        if !method.eq_ignore_ascii_case(expected) {
            return ServiceResponse::error(
                STATUS_METHOD_NOT_ALLOWED,
                ErrorResponse::new(format!("Method {} not allowed on {}", method, path)),
            );
        }

        match path {
            "" => self.info(),
            "/health" => self.health(),
            _ => self.analyze(body),
        }
    }

    /// Root route: service name, version, and routes
    pub fn info(&self) -> ServiceResponse {
        ServiceResponse::ok(&ServiceInfo::default())
    }

    /// Liveness probe; performs no computation
    pub fn health(&self) -> ServiceResponse {
        ServiceResponse::ok(&HealthResponse::default())
    }

    /// Analyze a JSON request body
    pub fn analyze(&self, body: &str) -> ServiceResponse {
        let request_id = Uuid::new_v4();
        let span = info_span!("analyze", %request_id);
        let _guard = span.enter();

        // Boundary validation: reject before the engine runs
        let request = match AnalyzeRequest::from_json(body) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "rejected malformed request");
                return ServiceResponse::error(STATUS_UNPROCESSABLE, ErrorResponse::new(e.to_string()));
            }
        };
        let validated = match request.validate() {
            Ok(validated) => validated,
            Err(e) => {
                warn!(user_id = %request.user_id, error = %e, "rejected invalid request");
                return ServiceResponse::error(STATUS_UNPROCESSABLE, ErrorResponse::new(e.to_string()));
            }
        };

        info!(
            user_id = %validated.user_id,
            metrics = validated.metrics.len(),
            "received analysis request"
        );

        match self.analyzer.analyze(&validated.user_id, &validated.metrics) {
            Ok(result) => ServiceResponse::ok(&result),
            Err(e) => self.failure(e),
        }
    }

    fn failure(&self, err: AnalysisError) -> ServiceResponse {
        if err.is_client_error() {
            warn!(error = %err, "analysis rejected input");
            ServiceResponse::error(STATUS_BAD_REQUEST, ErrorResponse::new(err.to_string()))
        } else {
            error!(error = ?err, "analysis failed");
            ServiceResponse::error(STATUS_INTERNAL_ERROR, ErrorResponse::internal())
        }
    }
}
