//! Dashboard, quota and SKU snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_mothers: u64,
    pub active_mothers: u64,
    pub total_seats: u64,
    pub used_seats: u64,
    pub pending_invites: u64,
    pub total_codes: u64,
    pub unused_codes: u64,
}

impl DashboardStats {
    /// Seat utilisation in percent, rounded down. Zero when there are no seats.
    pub fn seat_utilization_percent(&self) -> u8 {
        if self.total_seats == 0 {
            return 0;
        }
        ((self.used_seats.min(self.total_seats) * 100) / self.total_seats) as u8
    }
}

/// Point-in-time capacity of the mother pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub total_seats: u64,
    pub used_seats: u64,
    pub available_seats: u64,
    pub mothers_with_capacity: u64,
    pub captured_at: DateTime<Utc>,
}

impl QuotaSnapshot {
    pub fn is_exhausted(&self) -> bool {
        self.available_seats == 0
    }
}

/// Capacity grouped by product SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuSummary {
    pub sku: String,
    pub name: String,
    pub seat_limit: u32,
    pub mother_count: u64,
    pub available_seats: u64,
}
