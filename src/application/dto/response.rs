//! Response DTOs
//!
//! Data structures for backend response bodies that are not table rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /api/admin/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub authenticated: bool,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Generic `{success, message}` acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default = "default_true")]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// An empty 2xx body counts as success.
impl Default for Ack {
    fn default() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

/// Per-row failure inside a batch report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemError {
    #[serde(default)]
    pub id: Option<i64>,

    /// 1-based input line for imports
    #[serde(default)]
    pub line: Option<usize>,

    pub message: String,
}

/// Result of a batch action or bulk import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success_count: u32,
    pub failed_count: u32,

    #[serde(default)]
    pub errors: Vec<BatchItemError>,
}

impl BatchResult {
    pub fn total(&self) -> u32 {
        self.success_count.saturating_add(self.failed_count)
    }

    /// One-line summary for a toast.
    pub fn summary(&self) -> String {
        if self.failed_count == 0 {
            format!("{} succeeded", self.success_count)
        } else {
            format!("{} succeeded, {} failed", self.success_count, self.failed_count)
        }
    }
}

/// `GET /api/admin/batch/supported-actions`: action names keyed by resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportedBatchActions {
    pub actions: BTreeMap<String, Vec<String>>,
}

impl SupportedBatchActions {
    pub fn for_resource(&self, resource: &str) -> &[String] {
        self.actions.get(resource).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn supports(&self, resource: &str, action: &str) -> bool {
        self.for_resource(resource).iter().any(|a| a == action)
    }
}

/// Codes created by a generate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCodes {
    #[serde(default)]
    pub batch_id: Option<String>,

    pub codes: Vec<String>,
}

/// `POST /api/public/redeem` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub invite_id: Option<i64>,
}

/// `GET /api/redeem/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemStatus {
    pub email: String,

    /// Invite status string as reported by the backend
    pub status: String,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
