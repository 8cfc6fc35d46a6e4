//! Console API client
//!
//! Typed access to the backend's `/api/admin/*`, `/api/public/*` and
//! `/api/redeem/*` endpoints, usually through the proxy.

pub mod api_client;
pub mod csrf;
pub mod error;
pub mod retry;

pub use api_client::{ApiClient, ClientSettings, CSRF_TOKEN_PATH};
pub use csrf::{CsrfTokenStore, CSRF_HEADER};
pub use error::ApiError;
pub use retry::{retry_with_timeout, RetryPolicy};
