//! Mother account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

status_enum! {
    /// Lifecycle status of a mother account as reported by the backend.
    pub enum MotherStatus {
        Active => "active",
        Invalid => "invalid",
        Disabled => "disabled",
    }
}

/// A managed upstream account that can host invited seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotherAccount {
    pub id: i64,

    /// Account login, usually an email address
    pub name: String,

    pub status: MotherStatus,

    /// Seats this account can host
    pub seat_limit: u32,

    /// Seats currently occupied or reserved
    #[serde(default)]
    pub seats_in_use: u32,

    #[serde(default)]
    pub group_id: Option<i64>,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MotherAccount {
    /// Seats still free on this account.
    pub fn available_seats(&self) -> u32 {
        self.seat_limit.saturating_sub(self.seats_in_use)
    }

    /// Whether the pool could place another invite here.
    pub fn has_capacity(&self) -> bool {
        self.status == MotherStatus::Active && self.available_seats() > 0
    }
}
