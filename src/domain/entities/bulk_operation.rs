//! Bulk operation history entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of an admin-triggered batch action applied to many rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOperationLog {
    pub id: i64,

    /// e.g. "mother_import", "code_generate", "user_resend"
    pub operation_type: String,

    pub actor: String,
    pub total_count: u32,
    pub success_count: u32,
    pub failed_count: u32,

    #[serde(default)]
    pub metadata: serde_json::Value,

    pub created_at: DateTime<Utc>,
}

impl BulkOperationLog {
    /// True when every row succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed_count == 0 && self.success_count == self.total_count
    }
}
