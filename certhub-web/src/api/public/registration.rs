use actix_web::web::{self, Data};
use actix_web_validator::Json;
use certhub_error::WebResult;
use certhub_models::{
    domain::{OtpVerifyRequest, RegisterRequest, RegistrationSummary},
    web::WebResponse,
};
use uuid::Uuid;

use crate::AppState;

/// Registration routes, mounted under the public seminar scope
///
/// # Routes
/// - POST `/{id}/register`: Sign up and receive a verification code
/// - POST `/{id}/register/verify`: Confirm the registration with the code
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{id}/register", web::post().to(register))
        .route("/{id}/register/verify", web::post().to(verify));
}

/// Sign up for a seminar
///
/// # Endpoint
/// `POST /api/seminars/{id}/register`
async fn register(
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<RegisterRequest>,
) -> WebResult<WebResponse<RegistrationSummary>> {
    let summary = state.registrations.register(path.into_inner(), &req).await?;
    Ok(WebResponse::ok_with_message(
        "A verification code has been sent to your email.",
        summary,
    ))
}

/// Confirm a registration with the emailed code
///
/// # Endpoint
/// `POST /api/seminars/{id}/register/verify`
async fn verify(
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<OtpVerifyRequest>,
) -> WebResult<WebResponse<RegistrationSummary>> {
    let summary = state.registrations.verify(path.into_inner(), &req).await?;
    Ok(WebResponse::ok_with_message(
        "Your registration is confirmed.",
        summary,
    ))
}
