use actix_web::{
    web::{self, Data},
    HttpRequest,
};
use certhub_error::WebResult;
use certhub_models::{
    domain::CleanupSummary,
    enums::{ActionKind, AuditAction, Resource},
    web::WebResponse,
};
use serde::Serialize;
use serde_json::json;

use crate::{api::admin::audit_entry, rbac, AppState};

pub(super) const ROUTER_PREFIX: &str = "/maintenance";

/// Maintenance routes
///
/// # Routes
/// - POST `/cleanup`: Run the retention sweep now
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/cleanup", web::post().to(cleanup));
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MaintenanceReport {
    #[serde(flatten)]
    retention: CleanupSummary,
    expired_otps: u64,
    audit_entries: u64,
}

/// Run every retention sweep: expired certificates and their artifacts,
/// stale feedback, resolved name requests, dead OTP rows, and old audit
/// entries.
///
/// # Endpoint
/// `POST /api/admin/maintenance/cleanup`
async fn cleanup(
    http_req: HttpRequest,
    state: Data<AppState>,
) -> WebResult<WebResponse<MaintenanceReport>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Settings, ActionKind::Delete)?;

    let retention = state.certificates.cleanup().await?;
    let expired_otps = state.otp.cleanup_expired().await?;
    let audit_entries = state.audit.cleanup_old().await?;

    let report = MaintenanceReport {
        retention,
        expired_otps,
        audit_entries,
    };

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Delete,
            Resource::Settings,
            None,
            Some(json!({
                "certificates": report.retention.certificates,
                "expiredOtps": report.expired_otps,
                "auditEntries": report.audit_entries,
            })),
        ))
        .await;

    Ok(WebResponse::ok(report))
}
