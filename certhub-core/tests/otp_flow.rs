mod common;

use certhub_core::OtpService;
use certhub_error::{otp::OtpError, CertError};
use certhub_models::{
    constants::OTP_MAX_ATTEMPTS, entities::prelude::OtpVerificationActiveModel,
    enums::OtpPurpose,
};
use certhub_repository::OtpRepository;
use chrono::{Duration, Utc};
use sea_orm::ActiveValue::Set;

use common::test_db;

#[tokio::test]
async fn test_issue_replaces_active_code() {
    let db = test_db().await;
    let service = OtpService::new(db.clone());

    let first = service
        .issue("a@example.com", OtpPurpose::Certificate, None)
        .await
        .unwrap();
    let second = service
        .issue("a@example.com", OtpPurpose::Certificate, None)
        .await
        .unwrap();

    // Only the newest code exists for the scope.
    let active = OtpRepository::find_active("a@example.com", OtpPurpose::Certificate, None, &db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, second.id);
    assert_ne!(active.id, first.id);
}

#[tokio::test]
async fn test_codes_are_scoped_by_purpose() {
    let db = test_db().await;
    let service = OtpService::new(db.clone());

    let registration = service
        .issue("a@example.com", OtpPurpose::Registration, None)
        .await
        .unwrap();
    service
        .issue("a@example.com", OtpPurpose::Certificate, None)
        .await
        .unwrap();

    // Issuing a certificate code must not clobber the registration code.
    let active = OtpRepository::find_active("a@example.com", OtpPurpose::Registration, None, &db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, registration.id);
}

#[tokio::test]
async fn test_attempt_cap_burns_the_code() {
    let db = test_db().await;
    let service = OtpService::new(db.clone());

    let issued = service
        .issue("a@example.com", OtpPurpose::Certificate, None)
        .await
        .unwrap();
    let wrong = if issued.otp_code == "000000" { "111111" } else { "000000" };

    for attempt in 1..=OTP_MAX_ATTEMPTS {
        let err = service
            .verify("a@example.com", wrong, OtpPurpose::Certificate, None)
            .await
            .unwrap_err();
        if attempt < OTP_MAX_ATTEMPTS {
            assert!(matches!(err, CertError::Otp(OtpError::Mismatch)));
        } else {
            assert!(matches!(err, CertError::Otp(OtpError::TooManyAttempts)));
        }
    }

    // Even the right code is dead now.
    let err = service
        .verify("a@example.com", &issued.otp_code, OtpPurpose::Certificate, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CertError::Otp(OtpError::TooManyAttempts | OtpError::InvalidCode)
    ));
}

#[tokio::test]
async fn test_expired_code_is_rejected_and_removed() {
    let db = test_db().await;
    let service = OtpService::new(db.clone());

    let issued = service
        .issue("a@example.com", OtpPurpose::Certificate, None)
        .await
        .unwrap();
    let code = issued.otp_code.clone();

    let mut active: OtpVerificationActiveModel = issued.into();
    active.expires_at = Set(Utc::now() - Duration::minutes(1));
    OtpRepository::update(active, &db).await.unwrap();

    let err = service
        .verify("a@example.com", &code, OtpPurpose::Certificate, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Otp(OtpError::Expired)));

    // The row is gone, so the next check reports no code at all.
    let err = service
        .verify("a@example.com", &code, OtpPurpose::Certificate, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Otp(OtpError::InvalidCode)));
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_rows() {
    let db = test_db().await;
    let service = OtpService::new(db.clone());

    let stale = service
        .issue("old@example.com", OtpPurpose::Registration, None)
        .await
        .unwrap();
    let mut active: OtpVerificationActiveModel = stale.into();
    active.expires_at = Set(Utc::now() - Duration::hours(1));
    OtpRepository::update(active, &db).await.unwrap();

    service
        .issue("fresh@example.com", OtpPurpose::Registration, None)
        .await
        .unwrap();

    let removed = service.cleanup_expired().await.unwrap();
    assert_eq!(removed, 1);

    assert!(OtpRepository::find_active(
        "fresh@example.com",
        OtpPurpose::Registration,
        None,
        &db
    )
    .await
    .unwrap()
    .is_some());
}
