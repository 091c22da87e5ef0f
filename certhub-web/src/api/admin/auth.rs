use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use actix_web_validator::Json;
use certhub_common::{hash::bcrypt_check, jwt::encode_jwt};
use certhub_error::{web::WebError, WebResult};
use certhub_models::{
    constants::ADMIN_SESSION_COOKIE,
    domain::{AdminPublic, Claims, LoginRequest, LoginResponse},
    enums::{AuditAction, Resource},
    web::WebResponse,
};
use certhub_repository::AdminUserRepository;

use crate::{api::admin::audit_entry, rbac, AppState};

pub(super) const ROUTER_PREFIX: &str = "/auth";

/// Session routes (login is registered separately, outside the
/// authenticated scope)
///
/// # Routes
/// - POST `/logout`: End the session
/// - GET `/me`: Current admin account
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/logout", web::post().to(logout))
        .route("/me", web::get().to(me));
}

/// Login endpoint
///
/// # Endpoint
/// `POST /api/admin/auth/login`
pub(super) async fn login(
    http_req: HttpRequest,
    state: Data<AppState>,
    req: Json<LoginRequest>,
) -> WebResult<HttpResponse> {
    let email = req.email.trim().to_lowercase();
    let admin = AdminUserRepository::find_active_by_email(&email, &state.db)
        .await?
        .ok_or(WebError::Unauthorized)?;

    if !bcrypt_check(&req.password, &admin.password_hash) {
        return Err(WebError::Unauthorized);
    }

    let claims = Claims::new(&admin, state.settings.auth.token_ttl_hours);
    let token = encode_jwt(&claims, state.settings.auth.jwt_secret.as_bytes(), None)
        .map_err(|_| WebError::InternalError("Failed to encode session token".to_string()))?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Login,
            Resource::Users,
            Some(admin.id.to_string()),
            None,
        ))
        .await;

    let cookie = Cookie::build(ADMIN_SESSION_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(state.settings.auth.token_ttl_hours))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(WebResponse::ok(
        LoginResponse {
            token,
            admin: AdminPublic::from(admin),
        },
    )))
}

/// Logout endpoint
///
/// # Endpoint
/// `POST /api/admin/auth/logout`
async fn logout(http_req: HttpRequest, state: Data<AppState>) -> WebResult<HttpResponse> {
    let claims = rbac::claims(&http_req)?;

    state
        .audit
        .record(audit_entry(
            &claims,
            &http_req,
            AuditAction::Logout,
            Resource::Users,
            Some(claims.sub.to_string()),
            None,
        ))
        .await;

    // Stateless sessions: logout just clears the cookie; the token itself
    // expires on its own.
    let cookie = Cookie::build(ADMIN_SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(WebResponse::<()>::ok_empty()))
}

/// Current admin account
///
/// # Endpoint
/// `GET /api/admin/auth/me`
async fn me(http_req: HttpRequest, state: Data<AppState>) -> WebResult<WebResponse<AdminPublic>> {
    let claims = rbac::claims(&http_req)?;
    let admin = AdminUserRepository::find_by_id(claims.sub, &state.db)
        .await?
        .ok_or_else(|| WebError::NotFound("admin account".into()))?;
    Ok(WebResponse::ok(AdminPublic::from(admin)))
}
