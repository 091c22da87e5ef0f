use actix_web::web::{self, Data};
use certhub_error::{web::WebError, WebResult};
use certhub_models::{domain::PublicSeminar, web::WebResponse};
use certhub_repository::SeminarRepository;
use uuid::Uuid;

use crate::AppState;

pub(super) const ROUTER_PREFIX: &str = "/seminars";

/// Public seminar routes
///
/// # Routes
/// - GET `/{id}`: Public details of one seminar
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{id}", web::get().to(get_seminar));
}

/// Public seminar details
///
/// # Endpoint
/// `GET /api/seminars/{id}`
async fn get_seminar(
    state: Data<AppState>,
    path: web::Path<Uuid>,
) -> WebResult<WebResponse<PublicSeminar>> {
    let seminar = SeminarRepository::find_by_id(path.into_inner(), &state.db)
        .await?
        .ok_or_else(|| WebError::NotFound("seminar".into()))?;

    Ok(WebResponse::ok(PublicSeminar::from(seminar)))
}
