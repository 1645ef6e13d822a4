//! Error types for sentiscope-dash
//!
//! Maps handler and upstream failures onto HTTP responses with a JSON
//! error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::BackendError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Sentiment service unreachable or failing (502)
    #[error("Sentiment service error: {0}")]
    Upstream(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// sentiscope-common error
    #[error("Common error: {0}")]
    Common(#[from] sentiscope_common::Error),
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            // 4xx from the service carries a user-facing detail message
            // (empty text, bad CSV, missing text column)
            BackendError::Api(status, detail) if (400..500).contains(&status) => {
                ApiError::BadRequest(detail)
            }
            BackendError::Api(status, detail) => {
                ApiError::Upstream(format!("service returned {}: {}", status, detail))
            }
            BackendError::Network(msg) => ApiError::Upstream(format!("service unreachable: {}", msg)),
            BackendError::Parse(msg) => {
                ApiError::Upstream(format!("unexpected service response: {}", msg))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
