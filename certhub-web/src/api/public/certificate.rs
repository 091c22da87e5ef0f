use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web::{self, Data},
    HttpResponse,
};
use actix_web_validator::Json;
use certhub_error::WebResult;
use certhub_models::{
    domain::{
        CertificateClaimRequest, CertificateOtpRequest, CertificateVerification,
        CertificateVerifyResponse, FeedbackOutcome, FeedbackRequest, OtpVerifyRequest,
    },
    web::WebResponse,
};
use uuid::Uuid;

use crate::AppState;

pub(super) const ROUTER_PREFIX: &str = "/certificates";

/// Certificate claim routes
///
/// # Routes
/// - POST `/request-otp`: Send a claim code to a registered email
/// - POST `/verify-otp`: Verify the code and route to the next step
/// - GET `/{certificate_id}/download`: Download the PDF
/// - GET `/{certificate_id}/verify`: Public authenticity check
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/request-otp", web::post().to(request_otp))
        .route("/verify-otp", web::post().to(verify_otp))
        .route("/{certificate_id}/download", web::get().to(download))
        .route("/{certificate_id}/verify", web::get().to(verify_certificate));
}

/// Feedback route, mounted under the public seminar scope because the
/// submission is addressed to one seminar.
///
/// # Routes
/// - POST `/{id}/feedback`: Submit feedback; issues the certificate or opens
///   a name correction request
pub fn configure_seminar_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{id}/feedback", web::post().to(submit_feedback));
}

/// Request a certificate claim code
///
/// # Endpoint
/// `POST /api/certificates/request-otp`
///
/// An email with no registration row is a 404; no code is created for it.
async fn request_otp(
    state: Data<AppState>,
    req: Json<CertificateOtpRequest>,
) -> WebResult<WebResponse<()>> {
    state
        .certificates
        .request_otp(&req.normalized_email(), req.seminar_id)
        .await?;
    Ok(WebResponse::ok_with_message(
        "A verification code has been sent to your email.",
        (),
    ))
}

/// Verify a claim code
///
/// # Endpoint
/// `POST /api/certificates/verify-otp`
async fn verify_otp(
    state: Data<AppState>,
    req: Json<CertificateClaimRequest>,
) -> WebResult<WebResponse<CertificateVerifyResponse>> {
    let verify = OtpVerifyRequest {
        email: req.email.clone(),
        otp: req.otp.clone(),
    };
    let response = state.certificates.verify_otp(&verify, req.seminar_id).await?;
    Ok(WebResponse::ok(response))
}

/// Submit post-seminar feedback
///
/// # Endpoint
/// `POST /api/seminars/{id}/feedback`
async fn submit_feedback(
    state: Data<AppState>,
    path: web::Path<Uuid>,
    req: Json<FeedbackRequest>,
) -> WebResult<WebResponse<FeedbackOutcome>> {
    let outcome = state
        .certificates
        .submit_feedback(path.into_inner(), &req)
        .await?;
    let message = match &outcome {
        FeedbackOutcome::CertificateIssued { email_sent, .. } if *email_sent => {
            "Thank you! Your certificate has been sent to your email."
        }
        FeedbackOutcome::CertificateIssued { .. } => {
            "Thank you! Your certificate is ready for download."
        }
        FeedbackOutcome::NameChangeRequested => {
            "Your name correction request has been submitted for review."
        }
    };
    Ok(WebResponse::ok_with_message(message, outcome))
}

/// Download the certificate PDF
///
/// # Endpoint
/// `GET /api/certificates/{certificate_id}/download`
async fn download(
    state: Data<AppState>,
    path: web::Path<String>,
) -> WebResult<HttpResponse> {
    let (certificate, pdf) = state.certificates.download(&path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(format!(
                "{}.pdf",
                certificate.certificate_id
            ))],
        })
        .body(pdf))
}

/// Verify a certificate number
///
/// # Endpoint
/// `GET /api/certificates/{certificate_id}/verify`
async fn verify_certificate(
    state: Data<AppState>,
    path: web::Path<String>,
) -> WebResult<WebResponse<CertificateVerification>> {
    let certificate = state.certificates.lookup(&path.into_inner()).await?;
    Ok(WebResponse::ok(CertificateVerification::from(&certificate)))
}
