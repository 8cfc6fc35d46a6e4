//! JSON-over-HTTP client for the console API.
//!
//! Wraps a cookie-keeping `reqwest::Client` so the admin session survives
//! across calls, decodes 2xx bodies, classifies failures and attaches the
//! CSRF token to every mutating admin request.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::csrf::{CsrfTokenResponse, CsrfTokenStore, CSRF_HEADER};
use super::error::ApiError;
use crate::domain::{PageQuery, Paginated};

/// Path of the CSRF token endpoint
pub const CSRF_TOKEN_PATH: &str = "/api/admin/csrf-token";

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin serving `/api/*`, either the proxy or the backend itself
    pub base_url: String,

    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    csrf: CsrfTokenStore,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::Unreachable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: settings.timeout,
            csrf: CsrfTokenStore::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn csrf(&self) -> &CsrfTokenStore {
        &self.csrf
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET path?query`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path)).query(query);
        self.execute(request).await
    }

    /// `GET` a paginated table.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &PageQuery,
    ) -> Result<Paginated<T>, ApiError> {
        self.get(path, &query.to_pairs()).await
    }

    /// `POST` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(to_json(body)?)).await
    }

    /// `POST` without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, None).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(to_json(body)?)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, None).await
    }

    /// Send a request with an optional JSON body, attaching the CSRF token
    /// when the method mutates and the path is not public.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let mut request = self.http.request(method.clone(), self.url(path));

        if requires_csrf(&method, path) {
            let token = self
                .csrf
                .get_or_fetch(|| self.fetch_csrf_token())
                .await?;
            request = request.header(CSRF_HEADER, token);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let result = self.execute(request).await;
        if let Err(err) = &result {
            if err.is_csrf_rejection() {
                tracing::warn!(path, "CSRF token rejected; clearing cached token");
                self.csrf.clear().await;
            }
        }
        result
    }

    async fn fetch_csrf_token(&self) -> Result<String, ApiError> {
        let response: CsrfTokenResponse = self.get(CSRF_TOKEN_PATH, &[]).await?;
        response.into_token()
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout)
            } else {
                ApiError::from_transport(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            let err = ApiError::from_status(status, &body);
            tracing::debug!(status = status.as_u16(), error = %err, "Request failed");
            return Err(err);
        }

        decode_body(status, &body)
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a 2xx body. Empty bodies (204 and friends) decode as JSON `null`,
/// which satisfies `()` and `Option<_>`.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    let bytes: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::Decode(format!("status {}: {}", status.as_u16(), e)))
}

/// Mutating admin requests carry the CSRF token; public redeem paths and
/// reads do not.
pub fn requires_csrf(method: &Method, path: &str) -> bool {
    let mutating = matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    let path = format!("/{}", path.trim_start_matches('/'));
    let public = path.starts_with("/api/public/") || path.starts_with("/api/redeem/");
    mutating && !public && path != CSRF_TOKEN_PATH
}
