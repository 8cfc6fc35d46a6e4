//! User Service
//!
//! Invite (user) table operations. Resend is the one call wrapped in
//! [`retry_with_timeout`]; delivery can be slow and transiently fail.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::client::{retry_with_timeout, ApiClient, ApiError, RetryPolicy};
use crate::application::dto::Ack;
use crate::domain::{InviteRecord, PageQuery, Paginated};

pub const USERS_PATH: &str = "/api/admin/users";

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_invites(&self, query: &PageQuery) -> Result<Paginated<InviteRecord>, ApiError>;

    /// Resend the invite email, retrying transient failures
    async fn resend_invite(&self, id: i64) -> Result<Ack, ApiError>;

    async fn cancel_invite(&self, id: i64) -> Result<Ack, ApiError>;

    /// Remove the user from the team and delete the record
    async fn remove_user(&self, id: i64) -> Result<(), ApiError>;
}

pub struct UserServiceImpl {
    client: Arc<ApiClient>,
    resend_policy: RetryPolicy,
}

impl UserServiceImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self::with_retry_policy(client, RetryPolicy::default())
    }

    pub fn with_retry_policy(client: Arc<ApiClient>, resend_policy: RetryPolicy) -> Self {
        Self {
            client,
            resend_policy,
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_invites(&self, query: &PageQuery) -> Result<Paginated<InviteRecord>, ApiError> {
        self.client.get_page(USERS_PATH, query).await
    }

    async fn resend_invite(&self, id: i64) -> Result<Ack, ApiError> {
        let path = format!("{}/{}/resend", USERS_PATH, id);
        let (client, path) = (&self.client, path.as_str());
        let ack: Option<Ack> =
            retry_with_timeout(self.resend_policy, move || client.post_empty(path)).await?;
        Ok(ack.unwrap_or_default())
    }

    async fn cancel_invite(&self, id: i64) -> Result<Ack, ApiError> {
        let ack: Option<Ack> = self
            .client
            .post_empty(&format!("{}/{}/cancel", USERS_PATH, id))
            .await?;
        Ok(ack.unwrap_or_default())
    }

    async fn remove_user(&self, id: i64) -> Result<(), ApiError> {
        let _: Option<Ack> = self
            .client
            .delete(&format!("{}/{}", USERS_PATH, id))
            .await?;
        Ok(())
    }
}
