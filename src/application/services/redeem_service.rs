//! Redeem Service
//!
//! Public, unauthenticated redemption of codes. No CSRF token is involved.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::application::client::{ApiClient, ApiError};
use crate::application::dto::{RedeemRequest, RedeemResponse, RedeemStatus};

pub const REDEEM_PATH: &str = "/api/public/redeem";

/// Redeem service trait
#[async_trait]
pub trait RedeemService: Send + Sync {
    async fn redeem(&self, code: &str, email: &str) -> Result<RedeemResponse, ApiError>;

    async fn status(&self, email: &str) -> Result<RedeemStatus, ApiError>;
}

pub struct RedeemServiceImpl {
    client: Arc<ApiClient>,
}

impl RedeemServiceImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RedeemService for RedeemServiceImpl {
    async fn redeem(&self, code: &str, email: &str) -> Result<RedeemResponse, ApiError> {
        let request = RedeemRequest {
            code: code.trim().to_string(),
            email: email.trim().to_lowercase(),
        };
        request.validate().map_err(ApiError::invalid)?;
        self.client.post(REDEEM_PATH, &request).await
    }

    async fn status(&self, email: &str) -> Result<RedeemStatus, ApiError> {
        self.client
            .get("/api/redeem/status", &[("email", email.trim().to_lowercase())])
            .await
    }
}
