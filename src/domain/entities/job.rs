//! Background job queue entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

status_enum! {
    pub enum JobStatus {
        Pending => "pending",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
    }
}

impl JobStatus {
    /// Whether the job can still change state.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

/// A queued unit of backend work (invite delivery, imports, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub job_type: String,
    pub status: JobStatus,

    #[serde(default)]
    pub attempts: u32,

    #[serde(default)]
    pub last_error: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
