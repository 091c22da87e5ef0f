use actix_web::{
    web::{self, Data, Query},
    HttpRequest,
};
use actix_web_validator::Json;
use certhub_error::{web::WebError, WebResult};
use certhub_models::{
    domain::{
        AttendanceRequest, BroadcastRequest, NewSeminarRequest, NotifySummary, PageQuery,
        PageResult, RejectSeminarRequest, SeminarListQuery, UpdateSeminarRequest,
    },
    entities::prelude::{
        CertificateModel, RegistrationActiveModel, RegistrationModel, SeminarActiveModel,
        SeminarModel,
    },
    enums::{ActionKind, AuditAction, Resource, SeminarStatus},
    web::WebResponse,
};
use certhub_repository::{CertificateRepository, RegistrationRepository, SeminarRepository};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde_json::json;
use uuid::Uuid;

use crate::{api::admin::audit_entry, rbac, AppState};

pub(super) const ROUTER_PREFIX: &str = "/seminars";

/// Admin seminar management routes
///
/// # Routes
/// - GET ``: Paged seminar listing
/// - POST ``: Create a seminar request
/// - GET `/{id}`: Full seminar record
/// - PUT `/{id}`: Update fields
/// - DELETE `/{id}`: Remove a seminar
/// - POST `/{id}/approve`: Approve a pending seminar
/// - POST `/{id}/reject`: Reject a pending seminar
/// - GET `/{id}/registrations`: Paged registrations
/// - PUT `/{id}/registrations/{registration_id}/attendance`: Mark attendance
/// - GET `/{id}/certificates`: Paged issued certificates
/// - POST `/{id}/notify-students`: Certificate availability fan-out
/// - POST `/{id}/notify-coordinator`: Status mail to the coordinator
/// - POST `/{id}/broadcast`: Custom announcement fan-out
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(get_one))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(delete))
        .route("/{id}/approve", web::post().to(approve))
        .route("/{id}/reject", web::post().to(reject))
        .route("/{id}/registrations", web::get().to(registrations))
        .route(
            "/{id}/registrations/{registration_id}/attendance",
            web::put().to(attendance),
        )
        .route("/{id}/certificates", web::get().to(certificates))
        .route("/{id}/notify-students", web::post().to(notify_students))
        .route(
            "/{id}/notify-coordinator",
            web::post().to(notify_coordinator),
        )
        .route("/{id}/broadcast", web::post().to(broadcast));
}

async fn list(
    http_req: HttpRequest,
    state: Data<AppState>,
    query: Query<SeminarListQuery>,
) -> WebResult<WebResponse<PageResult<SeminarModel>>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Read)?;

    let page =
        SeminarRepository::page(query.page(), query.page_size(), query.status, &state.db).await?;
    Ok(WebResponse::ok(page))
}

async fn create(
    http_req: HttpRequest,
    state: Data<AppState>,
    req: Json<NewSeminarRequest>,
) -> WebResult<WebResponse<SeminarModel>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Create)?;

    let now = Utc::now();
    let model = SeminarActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(req.title.trim().to_string()),
        description: Set(req.description.clone()),
        date: Set(req.date),
        time: Set(req.time.clone()),
        duration: Set(req.duration.clone()),
        speaker_name: Set(req.speaker_name.clone()),
        speaker_title: Set(req.speaker_title.clone()),
        location_type: Set(req.location_type),
        venue_address: Set(req.venue_address.clone()),
        max_attendees: Set(req.max_attendees),
        organization_name: Set(req.organization_name.clone()),
        contact_person: Set(req.contact_person.clone()),
        contact_email: Set(req.contact_email.trim().to_lowercase()),
        contact_phone: Set(req.contact_phone.clone()),
        status: Set(SeminarStatus::Pending),
        registration_enabled: Set(true),
        certificate_enabled: Set(false),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        approved_at: Set(None),
        approved_by: Set(None),
    };
    let seminar = SeminarRepository::create(model, &state.db).await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Create,
            Resource::Seminars,
            Some(seminar.id.to_string()),
            Some(json!({ "title": seminar.title })),
        ))
        .await;

    Ok(WebResponse::ok(seminar))
}

async fn get_one(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
) -> WebResult<WebResponse<SeminarModel>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Read)?;

    let seminar = find_seminar(path.into_inner(), &state).await?;
    Ok(WebResponse::ok(seminar))
}

async fn update(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<UpdateSeminarRequest>,
) -> WebResult<WebResponse<SeminarModel>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Update)?;

    let seminar = find_seminar(path.into_inner(), &state).await?;
    let mut active: SeminarActiveModel = seminar.into();
    if let Some(title) = &req.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = &req.description {
        active.description = Set(Some(description.clone()));
    }
    if let Some(date) = req.date {
        active.date = Set(date);
    }
    if let Some(time) = &req.time {
        active.time = Set(time.clone());
    }
    if let Some(duration) = &req.duration {
        active.duration = Set(duration.clone());
    }
    if let Some(speaker_name) = &req.speaker_name {
        active.speaker_name = Set(speaker_name.clone());
    }
    if let Some(speaker_title) = &req.speaker_title {
        active.speaker_title = Set(Some(speaker_title.clone()));
    }
    if let Some(venue_address) = &req.venue_address {
        active.venue_address = Set(Some(venue_address.clone()));
    }
    if let Some(max_attendees) = req.max_attendees {
        active.max_attendees = Set(Some(max_attendees));
    }
    if let Some(registration_enabled) = req.registration_enabled {
        active.registration_enabled = Set(registration_enabled);
    }
    if let Some(certificate_enabled) = req.certificate_enabled {
        active.certificate_enabled = Set(certificate_enabled);
    }
    active.updated_at = Set(Utc::now());
    let updated = SeminarRepository::update(active, &state.db).await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(updated.id.to_string()),
            None,
        ))
        .await;

    Ok(WebResponse::ok(updated))
}

async fn delete(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
) -> WebResult<WebResponse<()>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Delete)?;

    let seminar = find_seminar(path.into_inner(), &state).await?;
    SeminarRepository::delete(seminar.id, &state.db).await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Delete,
            Resource::Seminars,
            Some(seminar.id.to_string()),
            Some(json!({ "title": seminar.title })),
        ))
        .await;

    Ok(WebResponse::<()>::ok_empty())
}

/// Approve a pending seminar. The status machine only admits
/// pending -> approved, so re-approving or approving a rejected seminar
/// conflicts instead of silently rewriting history.
async fn approve(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
) -> WebResult<WebResponse<SeminarModel>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Publish)?;

    let seminar = find_seminar(path.into_inner(), &state).await?;
    if !seminar.status.can_transition(SeminarStatus::Approved) {
        return Err(WebError::Conflict(format!(
            "Cannot approve a seminar in the {} state.",
            seminar.status
        )));
    }

    let mut active: SeminarActiveModel = seminar.into();
    active.status = Set(SeminarStatus::Approved);
    active.approved_at = Set(Some(Utc::now()));
    active.approved_by = Set(Some(claims.sub));
    active.updated_at = Set(Utc::now());
    let updated = SeminarRepository::update(active, &state.db).await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(updated.id.to_string()),
            Some(json!({ "status": "approved" })),
        ))
        .await;

    Ok(WebResponse::ok(updated))
}

async fn reject(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<RejectSeminarRequest>,
) -> WebResult<WebResponse<SeminarModel>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Publish)?;

    let seminar = find_seminar(path.into_inner(), &state).await?;
    if !seminar.status.can_transition(SeminarStatus::Rejected) {
        return Err(WebError::Conflict(format!(
            "Cannot reject a seminar in the {} state.",
            seminar.status
        )));
    }

    let mut active: SeminarActiveModel = seminar.into();
    active.status = Set(SeminarStatus::Rejected);
    active.rejection_reason = Set(req.reason.clone());
    active.updated_at = Set(Utc::now());
    let updated = SeminarRepository::update(active, &state.db).await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(updated.id.to_string()),
            Some(json!({ "status": "rejected", "reason": req.reason })),
        ))
        .await;

    Ok(WebResponse::ok(updated))
}

async fn registrations(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
    query: Query<PageQuery>,
) -> WebResult<WebResponse<PageResult<RegistrationModel>>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Read)?;

    let page = RegistrationRepository::page_by_seminar(
        path.into_inner(),
        query.page(),
        query.page_size(),
        &state.db,
    )
    .await?;
    Ok(WebResponse::ok(page))
}

async fn attendance(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    req: Json<AttendanceRequest>,
) -> WebResult<WebResponse<RegistrationModel>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Update)?;

    let (seminar_id, registration_id) = path.into_inner();
    let registration = RegistrationRepository::find_by_id(registration_id, &state.db)
        .await?
        .filter(|r| r.seminar_id == seminar_id)
        .ok_or_else(|| WebError::NotFound("registration".into()))?;

    let mut active: RegistrationActiveModel = registration.into();
    active.attended = Set(req.attended);
    let updated = RegistrationRepository::update(active, &state.db).await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(updated.id.to_string()),
            Some(json!({ "attended": req.attended })),
        ))
        .await;

    Ok(WebResponse::ok(updated))
}

async fn certificates(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
    query: Query<PageQuery>,
) -> WebResult<WebResponse<PageResult<CertificateModel>>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Read)?;

    let page = CertificateRepository::page_by_seminar(
        path.into_inner(),
        query.page(),
        query.page_size(),
        &state.db,
    )
    .await?;
    Ok(WebResponse::ok(page))
}

async fn notify_students(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
) -> WebResult<WebResponse<NotifySummary>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Update)?;

    let seminar_id = path.into_inner();
    let summary = state.notify.notify_students(seminar_id).await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(seminar_id.to_string()),
            Some(json!({ "notified": summary.sent, "failed": summary.failed })),
        ))
        .await;

    Ok(WebResponse::ok(summary))
}

async fn notify_coordinator(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
) -> WebResult<WebResponse<()>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Update)?;

    state.notify.notify_coordinator(path.into_inner()).await?;
    Ok(WebResponse::<()>::ok_empty())
}

async fn broadcast(
    http_req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<BroadcastRequest>,
) -> WebResult<WebResponse<NotifySummary>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Seminars, ActionKind::Update)?;

    let seminar_id = path.into_inner();
    let summary = state
        .notify
        .broadcast(seminar_id, &req.subject, &req.message)
        .await?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Update,
            Resource::Seminars,
            Some(seminar_id.to_string()),
            Some(json!({ "broadcast": req.subject, "sent": summary.sent })),
        ))
        .await;

    Ok(WebResponse::ok(summary))
}

async fn find_seminar(id: Uuid, state: &AppState) -> Result<SeminarModel, WebError> {
    SeminarRepository::find_by_id(id, &state.db)
        .await?
        .ok_or_else(|| WebError::NotFound("seminar".into()))
}
