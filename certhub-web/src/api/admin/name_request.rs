use actix_web::{
    web::{self, Data, Query},
    HttpRequest,
};
use actix_web_validator::Json;
use certhub_error::WebResult;
use certhub_models::{
    domain::{CertificateSummary, NameRequestDecision, NameRequestListQuery, PageResult},
    entities::prelude::NameRequestModel,
    enums::{ActionKind, AuditAction, Resource},
    web::WebResponse,
};
use certhub_repository::NameRequestRepository;
use serde_json::json;
use uuid::Uuid;

use crate::{api::admin::audit_entry, rbac, AppState};

pub(super) const ROUTER_PREFIX: &str = "/name-requests";

/// Name-correction review routes
///
/// # Routes
/// - GET ``: Paged listing, filterable by status
/// - POST `/{id}/approve`: Issue the certificate with the requested name
/// - POST `/{id}/reject`: Issue the certificate with the registered name
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("/{id}/approve", web::post().to(approve))
        .route("/{id}/reject", web::post().to(reject));
}

async fn list(
    http_req: HttpRequest,
    state: Data<AppState>,
    query: Query<NameRequestListQuery>,
) -> WebResult<WebResponse<PageResult<NameRequestModel>>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Read)?;

    let page = NameRequestRepository::page(
        query.status,
        query.page(),
        query.page_size(),
        &state.db,
    )
    .await?;
    Ok(WebResponse::ok(page))
}

/// Approve: the certificate is issued with the requested name. The review
/// state machine rejects double decisions, so a racing second approval
/// surfaces as a conflict rather than a duplicate certificate.
async fn approve(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<NameRequestDecision>,
) -> WebResult<WebResponse<CertificateSummary>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Update)?;

    let request_id = path.into_inner();
    let certificate = state
        .certificates
        .approve_name_request(request_id, claims.sub, req.reason.clone())
        .await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(request_id.to_string()),
            Some(json!({ "nameRequest": "approved", "certificateId": certificate.certificate_id })),
        ))
        .await;

    Ok(WebResponse::ok(certificate))
}

async fn reject(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<NameRequestDecision>,
) -> WebResult<WebResponse<CertificateSummary>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Update)?;

    let request_id = path.into_inner();
    let certificate = state
        .certificates
        .reject_name_request(request_id, claims.sub, req.reason.clone())
        .await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(request_id.to_string()),
            Some(json!({ "nameRequest": "rejected", "certificateId": certificate.certificate_id })),
        ))
        .await;

    Ok(WebResponse::ok(certificate))
}
