use actix_web::{
    web::{self, Data, Query},
    HttpRequest,
};
use certhub_error::WebResult;
use certhub_models::{
    domain::{AuditEntryView, AuditQuery, PageResult},
    enums::{ActionKind, Resource},
    web::WebResponse,
};

use crate::{rbac, AppState};

pub(super) const ROUTER_PREFIX: &str = "/audit";

/// Audit trail routes
///
/// # Routes
/// - GET ``: Paged, filterable audit listing
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list));
}

async fn list(
    http_req: HttpRequest,
    state: Data<AppState>,
    query: Query<AuditQuery>,
) -> WebResult<WebResponse<PageResult<AuditEntryView>>> {
    let claims = rbac::claims(&http_req)?;
    rbac::require(&claims, Resource::Audit, ActionKind::Read)?;

    let page = state.audit.list(&query).await?;
    Ok(WebResponse::ok(page))
}
