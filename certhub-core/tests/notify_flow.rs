mod common;

use std::sync::Arc;

use certhub_core::NotifyService;
use certhub_error::CertError;

use common::{seed_seminar, seed_verified_registration, test_db, FakeMailer};

#[tokio::test]
async fn test_notify_students_reports_partial_failures() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = NotifyService::new(
        db.clone(),
        mailer.clone(),
        "https://certs.example.com".to_string(),
    );
    let seminar = seed_seminar(&db, true, true).await;

    for i in 0..7 {
        seed_verified_registration(
            &db,
            seminar.id,
            &format!("Student {i}"),
            &format!("student{i}@example.com"),
        )
        .await;
    }
    mailer.fail_for("student2@example.com");
    mailer.fail_for("student5@example.com");

    let summary = service.notify_students(seminar.id).await.unwrap();
    assert_eq!(summary.total, 7);
    assert_eq!(summary.sent, 5);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.failed_emails.len(), 2);
    assert!(summary
        .failed_emails
        .contains(&"student2@example.com".to_string()));

    // Everyone else got the claim link.
    assert_eq!(mailer.sent_count(), 5);
}

#[tokio::test]
async fn test_notify_students_errors_when_every_send_fails() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = NotifyService::new(
        db.clone(),
        mailer.clone(),
        "https://certs.example.com".to_string(),
    );
    let seminar = seed_seminar(&db, true, true).await;

    for i in 0..3 {
        let email = format!("student{i}@example.com");
        seed_verified_registration(&db, seminar.id, &format!("Student {i}"), &email).await;
        mailer.fail_for(&email);
    }

    let err = service.notify_students(seminar.id).await.unwrap_err();
    assert!(matches!(err, CertError::Delivery(_)));
}

#[tokio::test]
async fn test_notify_students_requires_certificates_enabled() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = NotifyService::new(
        db.clone(),
        mailer.clone(),
        "https://certs.example.com".to_string(),
    );
    let seminar = seed_seminar(&db, true, false).await;
    seed_verified_registration(&db, seminar.id, "Jane Doe", "jane@example.com").await;

    let err = service.notify_students(seminar.id).await.unwrap_err();
    assert!(matches!(err, CertError::Validation(_)));
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_notify_students_requires_a_verified_audience() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = NotifyService::new(
        db.clone(),
        mailer.clone(),
        "https://certs.example.com".to_string(),
    );
    let seminar = seed_seminar(&db, true, true).await;

    let err = service.notify_students(seminar.id).await.unwrap_err();
    assert!(matches!(err, CertError::Validation(_)));
}

#[tokio::test]
async fn test_broadcast_reaches_verified_registrants() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = NotifyService::new(
        db.clone(),
        mailer.clone(),
        "https://certs.example.com".to_string(),
    );
    let seminar = seed_seminar(&db, true, true).await;
    seed_verified_registration(&db, seminar.id, "Jane Doe", "jane@example.com").await;

    let summary = service
        .broadcast(seminar.id, "Venue change", "We moved to Hall B.")
        .await
        .unwrap();
    assert_eq!(summary.sent, 1);

    let mails = mailer.sent_to("jane@example.com");
    assert_eq!(mails.len(), 1);
    assert!(mails[0].subject.contains("Venue change"));
}

#[tokio::test]
async fn test_notify_coordinator_sends_status_summary() {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let service = NotifyService::new(
        db.clone(),
        mailer.clone(),
        "https://certs.example.com".to_string(),
    );
    let seminar = seed_seminar(&db, true, true).await;
    seed_verified_registration(&db, seminar.id, "Jane Doe", "jane@example.com").await;

    service.notify_coordinator(seminar.id).await.unwrap();

    let mails = mailer.sent_to("coordinator@acme.edu");
    assert_eq!(mails.len(), 1);
    assert!(mails[0].html.contains("1 registration"));
}
