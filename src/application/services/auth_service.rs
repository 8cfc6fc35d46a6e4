//! Admin Session Service
//!
//! Cookie-based admin login, logout and session check.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::application::client::{ApiClient, ApiError};
use crate::application::dto::{Ack, LoginRequest, SessionInfo};

/// Admin session service trait
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange the admin password for a session cookie
    async fn login(&self, password: &str) -> Result<SessionInfo, ApiError>;

    /// End the session and forget the CSRF token
    async fn logout(&self) -> Result<(), ApiError>;

    /// Current session; a 401 maps to an unauthenticated session
    async fn session(&self) -> Result<SessionInfo, ApiError>;
}

pub struct AuthServiceImpl {
    client: Arc<ApiClient>,
}

impl AuthServiceImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, password: &str) -> Result<SessionInfo, ApiError> {
        let request = LoginRequest {
            password: password.to_string(),
        };
        request.validate().map_err(ApiError::invalid)?;

        // A token issued before login is bound to the anonymous session.
        self.client.csrf().clear().await;
        let session: SessionInfo = self.client.post("/api/admin/login", &request).await?;
        tracing::info!(username = ?session.username, "Admin logged in");
        Ok(session)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let result: Result<Ack, ApiError> = self.client.post_empty("/api/admin/logout").await;
        self.client.csrf().clear().await;
        result.map(|_| ())
    }

    async fn session(&self) -> Result<SessionInfo, ApiError> {
        match self.client.get::<SessionInfo>("/api/admin/me", &[]).await {
            Ok(session) => Ok(session),
            Err(err) if err.is_unauthorized() => Ok(SessionInfo {
                authenticated: false,
                username: None,
                expires_at: None,
            }),
            Err(err) => Err(err),
        }
    }
}
