mod common;

use std::sync::Arc;

use certhub_core::RegistrationService;
use certhub_error::{otp::OtpError, CertError};
use certhub_models::{
    domain::{OtpVerifyRequest, RegisterRequest},
    enums::OtpPurpose,
};
use certhub_repository::RegistrationRepository;

use common::{active_code, seed_seminar, test_db, FakeMailer};

fn register_request(email: &str, name: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        full_name: name.to_string(),
        phone: None,
        college_name: Some("Acme College".to_string()),
        year: Some("3".to_string()),
        city_state: None,
    }
}

#[tokio::test]
async fn test_register_creates_row_and_sends_code() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = RegistrationService::new(db.clone(), mailer.clone());
    let seminar = seed_seminar(&db, true, false).await;

    let summary = service
        .register(seminar.id, &register_request("Jane@Example.com ", "Jane Doe"))
        .await
        .unwrap();
    assert_eq!(summary.email, "jane@example.com");

    let row = RegistrationRepository::find_by_seminar_and_email(
        seminar.id,
        "jane@example.com",
        &db,
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!row.email_verified);

    // The verification code went out to the normalized address.
    assert_eq!(mailer.sent_to("jane@example.com").len(), 1);
}

#[tokio::test]
async fn test_reregister_before_verify_refreshes_single_row() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = RegistrationService::new(db.clone(), mailer.clone());
    let seminar = seed_seminar(&db, true, false).await;

    let first = service
        .register(seminar.id, &register_request("jane@example.com", "Jane Doe"))
        .await
        .unwrap();
    let second = service
        .register(seminar.id, &register_request("jane@example.com", "Jane A. Doe"))
        .await
        .unwrap();

    // Same row, updated details, and a fresh code each time.
    assert_eq!(first.id, second.id);
    assert_eq!(second.full_name, "Jane A. Doe");
    assert_eq!(mailer.sent_to("jane@example.com").len(), 2);
}

#[tokio::test]
async fn test_register_conflicts_once_verified() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = RegistrationService::new(db.clone(), mailer.clone());
    let seminar = seed_seminar(&db, true, false).await;

    service
        .register(seminar.id, &register_request("jane@example.com", "Jane Doe"))
        .await
        .unwrap();
    let code = active_code(&db, "jane@example.com", OtpPurpose::Registration, Some(seminar.id))
        .await;
    service
        .verify(
            seminar.id,
            &OtpVerifyRequest {
                email: "jane@example.com".to_string(),
                otp: code,
            },
        )
        .await
        .unwrap();

    let err = service
        .register(seminar.id, &register_request("jane@example.com", "Jane Doe"))
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Conflict(_)));
}

#[tokio::test]
async fn test_verify_marks_verified_and_burns_code() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = RegistrationService::new(db.clone(), mailer.clone());
    let seminar = seed_seminar(&db, true, false).await;

    service
        .register(seminar.id, &register_request("jane@example.com", "Jane Doe"))
        .await
        .unwrap();
    let code = active_code(&db, "jane@example.com", OtpPurpose::Registration, Some(seminar.id))
        .await;

    let request = OtpVerifyRequest {
        email: "jane@example.com".to_string(),
        otp: code.clone(),
    };
    service.verify(seminar.id, &request).await.unwrap();

    let row = RegistrationRepository::find_by_seminar_and_email(
        seminar.id,
        "jane@example.com",
        &db,
    )
    .await
    .unwrap()
    .unwrap();
    assert!(row.email_verified);
    assert!(row.verified_at.is_some());

    // Single use: replaying the same code fails.
    let err = service.verify(seminar.id, &request).await.unwrap_err();
    assert!(matches!(err, CertError::Otp(OtpError::InvalidCode)));
}

#[tokio::test]
async fn test_verify_with_wrong_code_is_rejected() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = RegistrationService::new(db.clone(), mailer.clone());
    let seminar = seed_seminar(&db, true, false).await;

    service
        .register(seminar.id, &register_request("jane@example.com", "Jane Doe"))
        .await
        .unwrap();

    let err = service
        .verify(
            seminar.id,
            &OtpVerifyRequest {
                email: "jane@example.com".to_string(),
                otp: "000000".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Otp(OtpError::Mismatch)));
}

#[tokio::test]
async fn test_register_rejected_when_registration_closed() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = RegistrationService::new(db.clone(), mailer.clone());
    let seminar = seed_seminar(&db, false, false).await;

    let err = service
        .register(seminar.id, &register_request("jane@example.com", "Jane Doe"))
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Validation(_)));
    assert_eq!(mailer.sent_count(), 0);
}
