//! Per-request authorization: pull the authenticated identity out of the
//! request and evaluate it against the static permission matrix.

use actix_web::{HttpMessage, HttpRequest};
use certhub_error::web::WebError;
use certhub_models::{
    domain::Claims,
    enums::{ActionKind, Resource},
    rbac::has_permission,
};

/// Identity attached by the authentication middleware. Absence means the
/// route was mounted outside the authenticated scope, which is a wiring bug
/// surfaced as 401 rather than a panic.
pub fn claims(req: &HttpRequest) -> Result<Claims, WebError> {
    req.extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(WebError::Unauthorized)
}

/// Deny unless the role grants `action` on `resource`.
pub fn require(claims: &Claims, resource: Resource, action: ActionKind) -> Result<(), WebError> {
    if has_permission(claims.role, resource, action) {
        return Ok(());
    }
    Err(WebError::Forbidden(format!(
        "Role {} may not {} {}",
        claims.role, action, resource
    )))
}
