mod common;

use std::sync::Arc;

use certhub_core::CertificateService;
use certhub_error::CertError;
use certhub_models::{
    constants::CERTIFICATE_RETENTION_DAYS,
    domain::{CertificateVerifyStatus, FeedbackOutcome, FeedbackRequest, OtpVerifyRequest},
    entities::prelude::CertificateActiveModel,
    enums::OtpPurpose,
};
use certhub_repository::{
    CertificateRepository, NameRequestRepository, OtpRepository, RegistrationRepository,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use uuid::Uuid;

use common::{
    active_code, seed_seminar, seed_unverified_registration, seed_verified_registration, test_db,
    FakeMailer, FakeRenderer, MemoryStore,
};

struct Harness {
    db: DatabaseConnection,
    mailer: Arc<FakeMailer>,
    store: Arc<MemoryStore>,
    service: CertificateService,
}

async fn harness() -> Harness {
    let db = test_db().await;
    let mailer = Arc::new(FakeMailer::default());
    let store = Arc::new(MemoryStore::default());
    let service = CertificateService::new(
        db.clone(),
        mailer.clone(),
        Arc::new(FakeRenderer),
        store.clone(),
        "https://certs.example.com".to_string(),
    );
    Harness {
        db,
        mailer,
        store,
        service,
    }
}

fn feedback(email: &str, certificate_name: &str, reason: Option<&str>) -> FeedbackRequest {
    FeedbackRequest {
        full_name: certificate_name.to_string(),
        email: email.to_string(),
        college_name: Some("Acme College".to_string()),
        year: None,
        city_state: None,
        career_interest: None,
        seminar_rating: Some(5),
        most_valuable_part: Some("The live demos".to_string()),
        future_suggestions: None,
        interested_in_courses: false,
        certificate_name: certificate_name.to_string(),
        registration_id: None,
        name_change_reason: reason.map(str::to_string),
    }
}

#[tokio::test]
async fn test_request_otp_refuses_unregistered_email_without_sending() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;

    let err = h
        .service
        .request_otp("stranger@example.com", Some(seminar.id))
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::NotFound(_)));

    // Nothing was mailed and no code was ever created.
    assert_eq!(h.mailer.sent_count(), 0);
    assert!(OtpRepository::find_active(
        "stranger@example.com",
        OtpPurpose::Certificate,
        Some(seminar.id),
        &h.db
    )
    .await
    .unwrap()
    .is_none());
}

#[tokio::test]
async fn test_request_otp_rejected_while_certificates_disabled() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, false).await;
    seed_verified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    let err = h
        .service
        .request_otp("jane@example.com", Some(seminar.id))
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Validation(_)));
}

#[tokio::test]
async fn test_request_otp_without_seminar_id_respects_certificate_flag() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, false).await;
    seed_verified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    // The resolved registration's seminar has certificates disabled, so no
    // code may be created even when the caller names no seminar.
    let err = h
        .service
        .request_otp("jane@example.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Validation(_)));
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_unverified_registrant_claims_and_is_verified_by_the_code() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    let registration =
        seed_unverified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    // An unverified registration still gets a claim code.
    h.service
        .request_otp("jane@example.com", Some(seminar.id))
        .await
        .unwrap();

    let code = active_code(
        &h.db,
        "jane@example.com",
        OtpPurpose::Certificate,
        Some(seminar.id),
    )
    .await;
    let verify = h
        .service
        .verify_otp(
            &OtpVerifyRequest {
                email: "jane@example.com".to_string(),
                otp: code,
            },
            Some(seminar.id),
        )
        .await
        .unwrap();
    assert_eq!(verify.status, CertificateVerifyStatus::ProceedToFeedback);

    // Passing the code proved the email; the row is now verified.
    let row = RegistrationRepository::find_by_id(registration.id, &h.db)
        .await
        .unwrap()
        .unwrap();
    assert!(row.email_verified);
    assert!(row.verified_at.is_some());
}

#[tokio::test]
async fn test_feedback_with_matching_name_issues_certificate() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    h.service
        .request_otp("jane@example.com", Some(seminar.id))
        .await
        .unwrap();

    let code = active_code(
        &h.db,
        "jane@example.com",
        OtpPurpose::Certificate,
        Some(seminar.id),
    )
    .await;
    let verify = h
        .service
        .verify_otp(
            &OtpVerifyRequest {
                email: "jane@example.com".to_string(),
                otp: code,
            },
            Some(seminar.id),
        )
        .await
        .unwrap();
    assert_eq!(verify.status, CertificateVerifyStatus::ProceedToFeedback);

    // Case and spacing differences in the printed name still count as a
    // match.
    let outcome = h
        .service
        .submit_feedback(seminar.id, &feedback("jane@example.com", "jane  doe", None))
        .await
        .unwrap();
    let FeedbackOutcome::CertificateIssued {
        certificate,
        email_sent,
    } = outcome
    else {
        panic!("expected a certificate");
    };
    assert!(email_sent);
    assert!(certificate.certificate_id.starts_with("ZX-"));

    // PDF was archived and mailed as an attachment.
    let key = format!("certificates/{}.pdf", certificate.certificate_id);
    assert!(h.store.objects.lock().unwrap().contains_key(&key));
    let mails = h.mailer.sent_to("jane@example.com");
    assert!(mails.iter().any(|m| m.attachment.is_some()));
}

#[tokio::test]
async fn test_second_claim_resends_existing_certificate() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    h.service
        .request_otp("jane@example.com", Some(seminar.id))
        .await
        .unwrap();
    let code = active_code(
        &h.db,
        "jane@example.com",
        OtpPurpose::Certificate,
        Some(seminar.id),
    )
    .await;
    h.service
        .verify_otp(
            &OtpVerifyRequest {
                email: "jane@example.com".to_string(),
                otp: code,
            },
            Some(seminar.id),
        )
        .await
        .unwrap();
    h.service
        .submit_feedback(seminar.id, &feedback("jane@example.com", "Jane Doe", None))
        .await
        .unwrap();

    // Claiming again routes straight to a resend, never a second row.
    h.service
        .request_otp("jane@example.com", Some(seminar.id))
        .await
        .unwrap();
    let code = active_code(
        &h.db,
        "jane@example.com",
        OtpPurpose::Certificate,
        Some(seminar.id),
    )
    .await;
    let verify = h
        .service
        .verify_otp(
            &OtpVerifyRequest {
                email: "jane@example.com".to_string(),
                otp: code,
            },
            Some(seminar.id),
        )
        .await
        .unwrap();
    assert_eq!(verify.status, CertificateVerifyStatus::CertificateSent);

    let page = CertificateRepository::page_by_seminar(seminar.id, 1, 10, &h.db)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_duplicate_feedback_conflicts() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    h.service
        .submit_feedback(seminar.id, &feedback("jane@example.com", "Jane Doe", None))
        .await
        .unwrap();
    let err = h
        .service
        .submit_feedback(seminar.id, &feedback("jane@example.com", "Jane Doe", None))
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Conflict(_)));
}

#[tokio::test]
async fn test_name_mismatch_requires_reason_and_opens_review() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Amit Kumar", "amit@example.com").await;

    // Too-short justification is rejected outright.
    let err = h
        .service
        .submit_feedback(
            seminar.id,
            &feedback("amit@example.com", "Amit K. Sharma", Some("typo")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Validation(_)));

    let outcome = h
        .service
        .submit_feedback(
            seminar.id,
            &feedback(
                "amit@example.com",
                "Amit K. Sharma",
                Some("My legal name changed after marriage."),
            ),
        )
        .await
        .unwrap();
    assert!(matches!(outcome, FeedbackOutcome::NameChangeRequested));

    // No certificate until an admin decides.
    assert!(CertificateRepository::find_by_seminar_and_email(
        seminar.id,
        "amit@example.com",
        &h.db
    )
    .await
    .unwrap()
    .is_none());
}

#[tokio::test]
async fn test_approved_name_request_issues_with_requested_name_once() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Amit Kumar", "amit@example.com").await;
    h.service
        .submit_feedback(
            seminar.id,
            &feedback(
                "amit@example.com",
                "Amit K. Sharma",
                Some("My legal name changed after marriage."),
            ),
        )
        .await
        .unwrap();

    let request = NameRequestRepository::find_pending_by_seminar_and_email(
        seminar.id,
        "amit@example.com",
        &h.db,
    )
    .await
    .unwrap()
    .unwrap();

    let reviewer = Uuid::new_v4();
    let certificate = h
        .service
        .approve_name_request(request.id, reviewer, Some("ID verified".to_string()))
        .await
        .unwrap();
    assert_eq!(certificate.recipient_name, "Amit K. Sharma");

    // The decision is final; a replayed approval cannot mint another
    // certificate.
    let err = h
        .service
        .approve_name_request(request.id, reviewer, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CertError::Conflict(_)));
}

#[tokio::test]
async fn test_rejected_name_request_issues_with_registered_name() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Amit Kumar", "amit@example.com").await;
    h.service
        .submit_feedback(
            seminar.id,
            &feedback(
                "amit@example.com",
                "Amit K. Sharma",
                Some("I prefer my pen name on the certificate."),
            ),
        )
        .await
        .unwrap();

    let request = NameRequestRepository::find_pending_by_seminar_and_email(
        seminar.id,
        "amit@example.com",
        &h.db,
    )
    .await
    .unwrap()
    .unwrap();

    let certificate = h
        .service
        .reject_name_request(request.id, Uuid::new_v4(), Some("No supporting ID".to_string()))
        .await
        .unwrap();
    assert_eq!(certificate.recipient_name, "Amit Kumar");
}

#[tokio::test]
async fn test_download_rerenders_on_archive_miss_and_counts() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    let FeedbackOutcome::CertificateIssued { certificate, .. } = h
        .service
        .submit_feedback(seminar.id, &feedback("jane@example.com", "Jane Doe", None))
        .await
        .unwrap()
    else {
        panic!("expected a certificate");
    };

    // Drop the archived copy; download must fall back to rendering.
    h.store.objects.lock().unwrap().clear();

    let (model, pdf) = h.service.download(&certificate.certificate_id).await.unwrap();
    assert!(!pdf.is_empty());
    assert_eq!(model.download_count, 1);

    let (model, _) = h.service.download(&certificate.certificate_id).await.unwrap();
    assert_eq!(model.download_count, 2);
}

#[tokio::test]
async fn test_cleanup_drops_certificates_past_retention() {
    let h = harness().await;
    let seminar = seed_seminar(&h.db, true, true).await;
    seed_verified_registration(&h.db, seminar.id, "Jane Doe", "jane@example.com").await;

    let FeedbackOutcome::CertificateIssued { certificate, .. } = h
        .service
        .submit_feedback(seminar.id, &feedback("jane@example.com", "Jane Doe", None))
        .await
        .unwrap()
    else {
        panic!("expected a certificate");
    };

    // Age the row past the retention window.
    let row = CertificateRepository::find_by_certificate_id(&certificate.certificate_id, &h.db)
        .await
        .unwrap()
        .unwrap();
    let mut active: CertificateActiveModel = row.into();
    active.generated_at = Set(Utc::now() - Duration::days(CERTIFICATE_RETENTION_DAYS + 1));
    active.update(&h.db).await.unwrap();

    let summary = h.service.cleanup().await.unwrap();
    assert_eq!(summary.certificates, 1);
    assert_eq!(summary.artifacts, 1);

    assert!(CertificateRepository::find_by_certificate_id(
        &certificate.certificate_id,
        &h.db
    )
    .await
    .unwrap()
    .is_none());
    let key = format!("certificates/{}.pdf", certificate.certificate_id);
    assert!(!h.store.objects.lock().unwrap().contains_key(&key));
}
