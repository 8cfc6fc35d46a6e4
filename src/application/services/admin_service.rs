//! Admin Service
//!
//! Mother accounts, redemption codes, logs, jobs, dashboard snapshots and
//! batch actions.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::application::client::{ApiClient, ApiError};
use crate::application::dto::{
    Ack, BatchRequest, BatchResult, GenerateCodesRequest, GeneratedCodes, MotherImportRequest,
    MotherInput, SupportedBatchActions,
};
use crate::domain::{
    AuditLogEntry, BulkOperationLog, DashboardStats, JobRecord, MotherAccount, PageQuery,
    Paginated, QuotaSnapshot, RedemptionCode, SkuSummary,
};

pub const MOTHERS_PATH: &str = "/api/admin/mothers";
pub const CODES_PATH: &str = "/api/admin/codes";
pub const AUDIT_LOGS_PATH: &str = "/api/admin/audit-logs";
pub const BULK_HISTORY_PATH: &str = "/api/admin/bulk-history";
pub const JOBS_PATH: &str = "/api/admin/jobs";
pub const SUPPORTED_ACTIONS_PATH: &str = "/api/admin/batch/supported-actions";

/// Admin service trait
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn list_mothers(&self, query: &PageQuery) -> Result<Paginated<MotherAccount>, ApiError>;

    async fn create_mother(&self, input: &MotherInput) -> Result<MotherAccount, ApiError>;

    async fn update_mother(&self, id: i64, input: &MotherInput) -> Result<MotherAccount, ApiError>;

    async fn delete_mother(&self, id: i64) -> Result<(), ApiError>;

    /// Submit already-validated rows for bulk import
    async fn import_mothers(&self, items: Vec<MotherInput>) -> Result<BatchResult, ApiError>;

    async fn list_codes(&self, query: &PageQuery) -> Result<Paginated<RedemptionCode>, ApiError>;

    async fn generate_codes(&self, request: &GenerateCodesRequest) -> Result<GeneratedCodes, ApiError>;

    async fn disable_code(&self, id: i64) -> Result<(), ApiError>;

    async fn list_audit_logs(&self, query: &PageQuery) -> Result<Paginated<AuditLogEntry>, ApiError>;

    async fn list_bulk_history(
        &self,
        query: &PageQuery,
    ) -> Result<Paginated<BulkOperationLog>, ApiError>;

    async fn list_jobs(&self, query: &PageQuery) -> Result<Paginated<JobRecord>, ApiError>;

    async fn stats(&self) -> Result<DashboardStats, ApiError>;

    async fn quota(&self) -> Result<QuotaSnapshot, ApiError>;

    async fn skus(&self) -> Result<Vec<SkuSummary>, ApiError>;

    async fn supported_batch_actions(&self) -> Result<SupportedBatchActions, ApiError>;

    async fn run_batch(&self, request: &BatchRequest) -> Result<BatchResult, ApiError>;
}

pub struct AdminServiceImpl {
    client: Arc<ApiClient>,
}

impl AdminServiceImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    async fn list_mothers(&self, query: &PageQuery) -> Result<Paginated<MotherAccount>, ApiError> {
        self.client.get_page(MOTHERS_PATH, query).await
    }

    async fn create_mother(&self, input: &MotherInput) -> Result<MotherAccount, ApiError> {
        input.validate().map_err(ApiError::invalid)?;
        self.client.post(MOTHERS_PATH, input).await
    }

    async fn update_mother(&self, id: i64, input: &MotherInput) -> Result<MotherAccount, ApiError> {
        input.validate().map_err(ApiError::invalid)?;
        self.client
            .put(&format!("{}/{}", MOTHERS_PATH, id), input)
            .await
    }

    async fn delete_mother(&self, id: i64) -> Result<(), ApiError> {
        let _: Option<Ack> = self
            .client
            .delete(&format!("{}/{}", MOTHERS_PATH, id))
            .await?;
        Ok(())
    }

    async fn import_mothers(&self, items: Vec<MotherInput>) -> Result<BatchResult, ApiError> {
        if items.is_empty() {
            return Err(ApiError::Invalid("Nothing to import".into()));
        }
        let count = items.len();
        let result: BatchResult = self
            .client
            .post(&format!("{}/import", MOTHERS_PATH), &MotherImportRequest { items })
            .await?;
        tracing::info!(
            submitted = count,
            succeeded = result.success_count,
            failed = result.failed_count,
            "Mother import finished"
        );
        Ok(result)
    }

    async fn list_codes(&self, query: &PageQuery) -> Result<Paginated<RedemptionCode>, ApiError> {
        self.client.get_page(CODES_PATH, query).await
    }

    async fn generate_codes(&self, request: &GenerateCodesRequest) -> Result<GeneratedCodes, ApiError> {
        request.validate().map_err(ApiError::invalid)?;
        self.client
            .post(&format!("{}/generate", CODES_PATH), request)
            .await
    }

    async fn disable_code(&self, id: i64) -> Result<(), ApiError> {
        let _: Option<Ack> = self
            .client
            .post_empty(&format!("{}/{}/disable", CODES_PATH, id))
            .await?;
        Ok(())
    }

    async fn list_audit_logs(&self, query: &PageQuery) -> Result<Paginated<AuditLogEntry>, ApiError> {
        self.client.get_page(AUDIT_LOGS_PATH, query).await
    }

    async fn list_bulk_history(
        &self,
        query: &PageQuery,
    ) -> Result<Paginated<BulkOperationLog>, ApiError> {
        self.client.get_page(BULK_HISTORY_PATH, query).await
    }

    async fn list_jobs(&self, query: &PageQuery) -> Result<Paginated<JobRecord>, ApiError> {
        self.client.get_page(JOBS_PATH, query).await
    }

    async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("/api/admin/stats", &[]).await
    }

    async fn quota(&self) -> Result<QuotaSnapshot, ApiError> {
        self.client.get("/api/admin/quota", &[]).await
    }

    async fn skus(&self) -> Result<Vec<SkuSummary>, ApiError> {
        self.client.get("/api/admin/skus", &[]).await
    }

    async fn supported_batch_actions(&self) -> Result<SupportedBatchActions, ApiError> {
        self.client.get(SUPPORTED_ACTIONS_PATH, &[]).await
    }

    async fn run_batch(&self, request: &BatchRequest) -> Result<BatchResult, ApiError> {
        request.validate().map_err(ApiError::invalid)?;
        let result: BatchResult = self.client.post("/api/admin/batch", request).await?;
        tracing::info!(
            resource = %request.resource,
            action = %request.action,
            summary = %result.summary(),
            "Batch action finished"
        );
        Ok(result)
    }
}
