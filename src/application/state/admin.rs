//! Admin area: codes, audit logs, bulk history, jobs and the stats header.

use crate::application::dto::BatchResult;
use crate::domain::{AuditLogEntry, BulkOperationLog, DashboardStats, JobRecord, RedemptionCode};

use super::{Reducer, TableAction, TableState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub codes: TableState<RedemptionCode>,
    pub audit_logs: TableState<AuditLogEntry>,
    pub bulk_history: TableState<BulkOperationLog>,
    pub jobs: TableState<JobRecord>,
    pub stats: Option<DashboardStats>,
    pub notice: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    Codes(TableAction<RedemptionCode>),
    AuditLogs(TableAction<AuditLogEntry>),
    BulkHistory(TableAction<BulkOperationLog>),
    Jobs(TableAction<JobRecord>),
    StatsLoaded(DashboardStats),
    StatsFailed(String),
    /// A batch run finished against the codes table
    BatchCompleted(BatchResult),
    Notice(String),
    DismissNotice,
}

impl AdminState {
    pub fn new(page_size: u32) -> Self {
        Self {
            codes: TableState::new(page_size),
            audit_logs: TableState::new(page_size),
            bulk_history: TableState::new(page_size),
            jobs: TableState::new(page_size),
            ..Default::default()
        }
    }

    /// Whether any job in the current page is still running.
    pub fn has_active_jobs(&self) -> bool {
        self.jobs.items.iter().any(|job| job.status.is_active())
    }
}

impl Reducer for AdminState {
    type Action = AdminAction;

    fn reduce(&mut self, action: AdminAction) {
        match action {
            AdminAction::Codes(action) => self.codes.reduce(action),
            AdminAction::AuditLogs(action) => self.audit_logs.reduce(action),
            AdminAction::BulkHistory(action) => self.bulk_history.reduce(action),
            AdminAction::Jobs(action) => self.jobs.reduce(action),
            AdminAction::StatsLoaded(stats) => {
                self.stats = Some(stats);
                self.last_error = None;
            }
            AdminAction::StatsFailed(message) => self.last_error = Some(message),
            AdminAction::BatchCompleted(result) => {
                self.codes.selected.clear();
                self.last_error = result.errors.first().map(|e| e.message.clone());
                self.notice = Some(result.summary());
            }
            AdminAction::Notice(message) => self.notice = Some(message),
            AdminAction::DismissNotice => self.notice = None,
        }
    }
}
