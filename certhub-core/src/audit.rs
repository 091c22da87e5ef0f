use certhub_error::CertResult;
use certhub_models::{
    constants::AUDIT_RETENTION_DAYS,
    domain::{AuditEntryInput, AuditEntryView, AuditQuery, PageResult},
    entities::prelude::AuditLogActiveModel,
};
use certhub_repository::AuditLogRepository;
use chrono::{Duration, Utc};
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use tracing::{info, warn};
use uuid::Uuid;

/// Append-only trail of admin activity.
#[derive(Clone)]
pub struct AuditService {
    db: DatabaseConnection,
}

impl AuditService {
    pub fn new(db: DatabaseConnection) -> Self {
        AuditService { db }
    }

    /// Record an event. Best-effort: audit must never fail the action it
    /// describes, so storage errors are logged and swallowed.
    pub async fn record(&self, entry: AuditEntryInput) {
        let model = AuditLogActiveModel {
            id: Set(Uuid::new_v4()),
            admin_id: Set(entry.admin_id),
            admin_email: Set(entry.admin_email),
            admin_role: Set(entry.admin_role),
            action: Set(entry.action),
            resource: Set(entry.resource),
            resource_id: Set(entry.resource_id),
            details: Set(entry.details),
            ip_address: Set(entry.ip_address),
            user_agent: Set(entry.user_agent),
            created_at: Set(Utc::now()),
        };
        if let Err(e) = AuditLogRepository::create(model, &self.db).await {
            warn!(error = %e, "audit entry write failed");
        }
    }

    pub async fn list(&self, query: &AuditQuery) -> CertResult<PageResult<AuditEntryView>> {
        let page = AuditLogRepository::page(query, &self.db).await?;
        Ok(PageResult {
            records: page.records.into_iter().map(AuditEntryView::from).collect(),
            total: page.total,
            pages: page.pages,
            page: page.page,
            page_size: page.page_size,
        })
    }

    /// Drop entries past the retention window.
    pub async fn cleanup_old(&self) -> CertResult<u64> {
        let cutoff = Utc::now() - Duration::days(AUDIT_RETENTION_DAYS);
        let removed = AuditLogRepository::delete_created_before(cutoff, &self.db).await?;
        if removed > 0 {
            info!(removed, "purged old audit entries");
        }
        Ok(removed)
    }
}
