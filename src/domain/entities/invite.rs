//! Invite (user) record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

status_enum! {
    /// Delivery status of a seat invite.
    pub enum InviteStatus {
        Pending => "pending",
        Sent => "sent",
        Accepted => "accepted",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

impl InviteStatus {
    /// Whether the backend accepts a resend for this status.
    pub fn can_resend(&self) -> bool {
        matches!(self, Self::Pending | Self::Sent | Self::Failed)
    }

    /// Whether the invite can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending | Self::Sent)
    }
}

/// An invited user as listed on the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteRecord {
    pub id: i64,
    pub email: String,
    pub status: InviteStatus,

    /// Mother account the seat was placed on
    #[serde(default)]
    pub mother_id: Option<i64>,

    #[serde(default)]
    pub team_id: Option<String>,

    /// Redemption code used to obtain the invite, if any
    #[serde(default)]
    pub code: Option<String>,

    /// Last delivery error reported by the backend
    #[serde(default)]
    pub error_msg: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
