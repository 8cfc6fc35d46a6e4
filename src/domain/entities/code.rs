//! Redemption code record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

status_enum! {
    pub enum CodeStatus {
        Unused => "unused",
        Used => "used",
        Expired => "expired",
        Disabled => "disabled",
    }
}

/// Single-use token a user exchanges for a seat invite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionCode {
    pub id: i64,
    pub code: String,
    pub status: CodeStatus,

    /// Generation batch this code belongs to
    #[serde(default)]
    pub batch_id: Option<String>,

    /// Email that redeemed the code
    #[serde(default)]
    pub used_by: Option<String>,

    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl RedemptionCode {
    /// Whether the code is past its expiry at `now`, regardless of the
    /// status the backend last reported.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
