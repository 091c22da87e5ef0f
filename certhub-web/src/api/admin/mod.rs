pub mod audit;
pub mod auth;
pub mod maintenance;
pub mod name_request;
pub mod seminar;

use actix_web::{http::header::USER_AGENT, web, HttpRequest};
use certhub_models::{
    domain::{AuditEntryInput, Claims},
    enums::{AuditAction, Resource},
};

use crate::middleware::RateLimit;

/// Routes under `/admin` reachable without a session. Login still sits
/// behind the rate limiter so credential guessing is throttled like any
/// other public endpoint.
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(RateLimit)
            .route("/login", web::post().to(auth::login)),
    );
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(auth::ROUTER_PREFIX).configure(auth::configure_routes))
        .service(web::scope(seminar::ROUTER_PREFIX).configure(seminar::configure_routes))
        .service(
            web::scope(name_request::ROUTER_PREFIX).configure(name_request::configure_routes),
        )
        .service(web::scope(audit::ROUTER_PREFIX).configure(audit::configure_routes))
        .service(web::scope(maintenance::ROUTER_PREFIX).configure(maintenance::configure_routes));
}

/// Assemble an audit entry from the request context. Identity fields are
/// denormalized from the token so entries outlive admin accounts.
pub(super) fn audit_entry(
    claims: &Claims,
    req: &HttpRequest,
    action: AuditAction,
    resource: Resource,
    resource_id: Option<String>,
    details: Option<serde_json::Value>,
) -> AuditEntryInput {
    AuditEntryInput {
        admin_id: claims.sub,
        admin_email: claims.email.clone(),
        admin_role: claims.role,
        action,
        resource: resource.to_string(),
        resource_id,
        details,
        ip_address: req
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string),
        user_agent: req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}
