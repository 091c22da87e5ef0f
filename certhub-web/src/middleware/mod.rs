mod auth;
mod rate_limit;

pub use auth::Authentication;
pub use rate_limit::RateLimit;

use actix_web::dev::ServiceRequest;

/// Best-available client address for rate limiting and audit entries.
/// Honors proxy headers when present, falls back to the peer address.
pub fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
