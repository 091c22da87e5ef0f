pub mod delivery;
pub mod otp;
pub mod storage;
pub mod web;

use anyhow::Error as AnyhowError;
use delivery::DeliveryError;
use otp::OtpError;
use serde_json::Error as SerdeJsonError;
use storage::StorageError;
use thiserror::Error;
use web::WebError;

pub type CertResult<T, E = CertError> = anyhow::Result<T, E>;
pub type WebResult<T, E = WebError> = anyhow::Result<T, E>;
pub type StorageResult<T, E = StorageError> = Result<T, E>;
pub type DeliveryResult<T, E = DeliveryError> = Result<T, E>;

/// Workflow-level error taxonomy.
///
/// Expected outcomes (validation, conflicts, missing rows, disabled feature
/// flags) are modeled as dedicated variants so handlers can map them to
/// structured JSON responses instead of opaque 500s. Collaborator failures
/// (email, PDF, object storage) stay distinguishable via `Delivery`.
#[derive(Error, Debug)]
pub enum CertError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotConfigured(String),
    #[error("too many requests")]
    RateLimited,
    #[error("{0}")]
    Otp(#[from] OtpError),
    #[error("{0}")]
    Delivery(#[from] DeliveryError),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Anyhow(#[from] AnyhowError),
    #[error("{0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Json(#[from] SerdeJsonError),
}

impl From<String> for CertError {
    #[inline]
    fn from(e: String) -> Self {
        CertError::Msg(e)
    }
}

impl From<&str> for CertError {
    #[inline]
    fn from(e: &str) -> Self {
        CertError::Msg(e.to_string())
    }
}

impl From<sea_orm::DbErr> for CertError {
    #[inline]
    fn from(e: sea_orm::DbErr) -> Self {
        CertError::Storage(StorageError::DbError(e))
    }
}

impl From<CertError> for WebError {
    fn from(e: CertError) -> Self {
        match e {
            CertError::Validation(msg) => WebError::BadRequest(msg),
            CertError::NotFound(what) => WebError::NotFound(what),
            CertError::Conflict(msg) => WebError::Conflict(msg),
            CertError::NotConfigured(msg) => WebError::BadRequest(msg),
            CertError::RateLimited => WebError::TooManyRequests,
            CertError::Otp(otp) => WebError::BadRequest(otp.to_string()),
            CertError::Storage(StorageError::EntityNotFound(what)) => WebError::NotFound(what),
            // Dependency and unexpected failures: callers log the detail,
            // the response body stays generic.
            other => WebError::InternalError(other.to_string()),
        }
    }
}
