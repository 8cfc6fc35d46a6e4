//! Audit log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One admin action recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,

    /// Admin username or "system"
    pub actor: String,

    /// Action name, e.g. "mother.create"
    pub action: String,

    #[serde(default)]
    pub target_type: Option<String>,

    #[serde(default)]
    pub target_id: Option<String>,

    /// Free-form details
    #[serde(default)]
    pub payload: serde_json::Value,

    #[serde(default)]
    pub ip: Option<String>,

    pub created_at: DateTime<Utc>,
}
