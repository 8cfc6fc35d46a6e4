//! Client-side error classification.
//!
//! The console only distinguishes "backend unreachable" from "backend
//! returned non-2xx"; everything else is a local failure (CSRF, timeout,
//! decoding). Errors are `Clone` so a shared in-flight request can hand the
//! same failure to every waiter.

use reqwest::StatusCode;
use serde_json::Value;

/// Client error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure, or the proxy reported the backend as down (502/503)
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// Backend answered with a non-2xx status
    #[error("Request failed ({status}): {message}")]
    Backend { status: u16, message: String },

    /// CSRF token could not be obtained, so the mutating request was not sent
    #[error("CSRF token unavailable: {0}")]
    Csrf(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Rejected locally before any request was sent
    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Build an error from a non-2xx status and the raw response body.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|json| extract_message(&json))
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty() && text.len() <= 200 && !text.starts_with('<')).then_some(text)
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        match status {
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                ApiError::Unreachable(message)
            }
            _ => ApiError::Backend {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Classify a reqwest transport error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }

    /// Local validation failure.
    pub fn invalid(errors: validator::ValidationErrors) -> Self {
        ApiError::Invalid(errors.to_string())
    }

    /// HTTP status if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// A 403 complaining about the CSRF token.
    pub fn is_csrf_rejection(&self) -> bool {
        match self {
            ApiError::Backend { status: 403, message } => {
                message.to_ascii_lowercase().contains("csrf")
            }
            _ => false,
        }
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Unreachable(_) | ApiError::Timeout(_) => true,
            ApiError::Backend { status, .. } => *status >= 500,
            ApiError::Csrf(_) | ApiError::Decode(_) | ApiError::Invalid(_) => false,
        }
    }

    /// Text suitable for a toast or alert.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unreachable(_) => {
                "Cannot reach the backend service. Please try again later.".to_string()
            }
            ApiError::Backend { message, .. } => message.clone(),
            ApiError::Csrf(reason) => format!("Security check failed (CSRF): {}", reason),
            ApiError::Timeout(_) => "The request timed out. Please try again.".to_string(),
            ApiError::Decode(_) => "The server returned an unexpected response.".to_string(),
            ApiError::Invalid(message) => message.clone(),
        }
    }
}

/// Pull a human message out of a backend error body.
///
/// Checks `message`, then `detail` (a string, or a list of `{msg}` objects
/// as produced by request validation), then `error`.
pub fn extract_message(json: &Value) -> Option<String> {
    if let Some(message) = json.get("message").and_then(Value::as_str) {
        if !message.is_empty() {
            return Some(message.to_string());
        }
    }

    match json.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(entries)) => {
            let joined = entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        _ => {}
    }

    json.get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
