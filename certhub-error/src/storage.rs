use thiserror::Error;

#[derive(Error, Debug, Default)]
pub enum StorageError {
    #[error("database unavailable")]
    #[default]
    StorageUnavailable,

    #[error("database error: `{0}`")]
    DbError(#[from] sea_orm::DbErr),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// Insert rejected by a unique index. The schema constraint is the
    /// authoritative guard for check-then-insert races; this variant lets
    /// workflows translate the violation into a domain conflict.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}
