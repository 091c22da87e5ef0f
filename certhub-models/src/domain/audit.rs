use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use uuid::Uuid;

use crate::entities::prelude::AuditLogModel;
use crate::enums::{AuditAction, Role};

/// Filter for the admin audit trail listing. All filters are optional and
/// combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub admin_id: Option<Uuid>,
    pub action: Option<AuditAction>,
    pub resource: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl AuditQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(50).clamp(1, 200)
    }
}

/// One audit event as recorded by a handler. Identity fields are
/// denormalized so entries survive admin account deletion.
#[derive(Debug, Clone)]
pub struct AuditEntryInput {
    pub admin_id: Uuid,
    pub admin_email: String,
    pub admin_role: Role,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<String>,
    pub details: Option<Json>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntryView {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub admin_email: String,
    pub admin_role: Role,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<String>,
    pub details: Option<Json>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogModel> for AuditEntryView {
    fn from(m: AuditLogModel) -> Self {
        AuditEntryView {
            id: m.id,
            admin_id: m.admin_id,
            admin_email: m.admin_email,
            admin_role: m.admin_role,
            action: m.action,
            resource: m.resource,
            resource_id: m.resource_id,
            details: m.details,
            ip_address: m.ip_address,
            created_at: m.created_at,
        }
    }
}
