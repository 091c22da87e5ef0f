use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: `{0}`")]
    Forbidden(String),
    #[error("BadRequest: `{0}`")]
    BadRequest(String),
    #[error("`{0}` not found")]
    NotFound(String),
    #[error("Conflict: `{0}`")]
    Conflict(String),
    #[error("Too many requests. Please try again later.")]
    TooManyRequests,
    #[error("InternalError: `{0}`")]
    InternalError(String),
    #[error("StorageError: `{0}`")]
    StorageError(#[from] StorageError),
}

impl From<std::io::Error> for WebError {
    fn from(e: std::io::Error) -> Self {
        WebError::InternalError(e.to_string())
    }
}

impl From<sea_orm::DbErr> for WebError {
    fn from(e: sea_orm::DbErr) -> Self {
        WebError::StorageError(StorageError::DbError(e))
    }
}

impl ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "error": self.to_string()
        });
        match self {
            WebError::Unauthorized => HttpResponse::Unauthorized().json(body),
            WebError::Forbidden(_) => HttpResponse::Forbidden().json(body),
            WebError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            WebError::NotFound(_) => HttpResponse::NotFound().json(body),
            WebError::Conflict(_) => HttpResponse::Conflict().json(body),
            WebError::TooManyRequests => HttpResponse::TooManyRequests().json(body),
            // Internal detail is logged server-side; the body stays generic
            // so credentials and collaborator specifics never leak.
            WebError::InternalError(_) | WebError::StorageError(_) => {
                body["error"] = json!("Something went wrong. Please try again.");
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}
