//! Unified error types for the control plane.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the control-plane service.
#[derive(Error, Debug)]
pub enum McpError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Request-level API error.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level errors, rendered as `{"error": ...}` JSON bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body failed validation.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// No job with the given id is tracked.
    #[error("job not found")]
    JobNotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// No metrics recorder is installed in this process.
    #[error("metrics recorder not installed")]
    MetricsUnavailable,
}

impl ApiError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::JobNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MetricsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, McpError>;
