//! Upstream HTTP client
//!
//! Shared `reqwest::Client` used by the proxy handlers to reach the backend.

use std::time::Duration;

use crate::config::BackendSettings;

/// Build the upstream client from settings.
///
/// Redirects are returned to the caller as-is and cookies are never stored
/// here; both belong to the browser session on the other side of the proxy.
pub fn create_client(settings: &BackendSettings) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
