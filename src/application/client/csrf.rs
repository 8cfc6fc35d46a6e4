//! In-memory CSRF token cache.
//!
//! The token is fetched lazily the first time a mutating request needs it
//! and reused afterwards. The async mutex is held across the fetch, so
//! concurrent first callers wait for a single request instead of racing.

use std::future::Future;

use serde::Deserialize;
use tokio::sync::Mutex;

use super::error::ApiError;

/// Header carrying the token on mutating requests
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Body of `GET /api/admin/csrf-token`
#[derive(Debug, Deserialize)]
pub struct CsrfTokenResponse {
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl CsrfTokenResponse {
    /// The token, or a CSRF failure when absent or blank.
    pub fn into_token(self) -> Result<String, ApiError> {
        match self.csrf_token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ApiError::Csrf(
                "backend response did not include a csrf_token".into(),
            )),
        }
    }
}

#[derive(Debug, Default)]
pub struct CsrfTokenStore {
    token: Mutex<Option<String>>,
}

impl CsrfTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, fetching it with `fetch` on first use.
    ///
    /// Any fetch failure is reported as `ApiError::Csrf` and nothing is cached.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ApiError>>,
    {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        let token = fetch().await.map_err(|e| match e {
            ApiError::Csrf(reason) => ApiError::Csrf(reason),
            other => ApiError::Csrf(format!("failed to fetch token: {}", other)),
        })?;

        tracing::debug!("CSRF token cached");
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next mutating call refetches it.
    pub async fn clear(&self) {
        self.token.lock().await.take();
    }

    pub async fn cached(&self) -> Option<String> {
        self.token.lock().await.clone()
    }
}
