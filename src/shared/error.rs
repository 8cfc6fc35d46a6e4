//! Application Error Types
//!
//! Centralized error handling with Axum integration. Every error the proxy
//! produces itself (as opposed to errors passed through from the backend)
//! renders as the same JSON envelope:
//!
//! ```json
//! { "success": false, "error": "backend_unreachable", "message": "..." }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

impl AppError {
    /// Status code and machine-readable error key.
    pub fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BackendUnreachable(_) => (StatusCode::BAD_GATEWAY, "backend_unreachable"),
            AppError::BackendUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "backend_unavailable")
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Classify a transport error from the upstream call.
    pub fn from_upstream(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::BackendUnavailable("Backend did not respond in time".into())
        } else {
            AppError::BackendUnreachable(format!("Unable to reach backend service: {}", err))
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, key) = self.status_and_key();
        let message = match &self {
            AppError::BackendUnreachable(msg)
            | AppError::BackendUnavailable(msg)
            | AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".into()
            }
        };

        (status, Json(ErrorResponse::new(key, message))).into_response()
    }
}
