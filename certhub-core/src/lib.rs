//! Workflow layer: the seminar registration, certificate issuance, review,
//! and notification flows. Services own a database handle and the outbound
//! collaborators they need; nothing here touches global state.

pub mod audit;
pub mod certificate;
pub mod ids;
pub mod notify;
pub mod otp;
pub mod registration;

pub use audit::AuditService;
pub use certificate::CertificateService;
pub use notify::NotifyService;
pub use otp::OtpService;
pub use registration::RegistrationService;

use certhub_error::storage::StorageError;
use sea_orm::SqlErr;

/// True when a repository error is the database rejecting a duplicate key.
/// Workflows treat this as "the row already exists", not as a failure.
pub(crate) fn is_unique_violation(err: &StorageError) -> bool {
    match err {
        StorageError::DbError(db_err) => {
            matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        }
        StorageError::UniqueViolation(_) => true,
        _ => false,
    }
}

/// Name comparison for the certificate flow: case- and whitespace-
/// insensitive so "jane doe " matches "Jane Doe".
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_ignores_case_and_spacing() {
        assert!(names_match("Jane Doe", "jane doe"));
        assert!(names_match("  Jane   Doe ", "Jane Doe"));
        assert!(!names_match("Jane Doe", "Jane D. Doe"));
    }
}
