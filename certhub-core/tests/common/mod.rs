//! Shared harness for the workflow integration tests: an in-memory SQLite
//! database with the real migrations applied, plus recording fakes for the
//! outbound collaborators.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use certhub_delivery::{ArtifactStore, CertificateRenderer, EmailMessage, Mailer};
use certhub_error::{delivery::DeliveryError, DeliveryResult};
use certhub_models::{
    entities::prelude::{
        CertificateModel, RegistrationActiveModel, RegistrationModel, SeminarActiveModel,
        SeminarModel,
    },
    enums::{LocationType, SeminarStatus},
    settings::Db,
};
use certhub_storage::{init_db, Migrator, MigratorTrait};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use uuid::Uuid;

pub async fn test_db() -> DatabaseConnection {
    let config = Db {
        url: "sqlite::memory:".to_string(),
        // One connection so every query sees the same in-memory database.
        max_connections: 1,
        connect_timeout_ms: 5_000,
        idle_timeout_ms: 60_000,
    };
    let db = init_db(&config).await.expect("connect test db");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

/// Mailer that records every message and can be told to fail for specific
/// recipients.
#[derive(Default)]
pub struct FakeMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub failing: Mutex<HashSet<String>>,
}

impl FakeMailer {
    pub fn fail_for(&self, email: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert(email.to_string());
    }

    pub fn sent_to(&self, email: &str) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to_email == email)
            .cloned()
            .collect()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, message: &EmailMessage) -> DeliveryResult<()> {
        if self.failing.lock().unwrap().contains(&message.to_email) {
            return Err(DeliveryError::Email(format!(
                "simulated failure for {}",
                message.to_email
            )));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub struct FakeRenderer;

impl CertificateRenderer for FakeRenderer {
    fn render(&self, certificate: &CertificateModel) -> DeliveryResult<Vec<u8>> {
        Ok(format!("%PDF {}", certificate.certificate_id).into_bytes())
    }
}

/// In-memory artifact store.
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> DeliveryResult<()> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> DeliveryResult<Option<Vec<u8>>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> DeliveryResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

pub async fn seed_seminar(
    db: &DatabaseConnection,
    registration_enabled: bool,
    certificate_enabled: bool,
) -> SeminarModel {
    use certhub_repository::SeminarRepository;

    let now = Utc::now();
    let model = SeminarActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set("Intro to Embedded Rust".to_string()),
        description: Set(None),
        date: Set(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()),
        time: Set("10:00".to_string()),
        duration: Set("2h".to_string()),
        speaker_name: Set("Dr. Meera Iyer".to_string()),
        speaker_title: Set(Some("Principal Engineer".to_string())),
        location_type: Set(LocationType::Online),
        venue_address: Set(None),
        max_attendees: Set(Some(200)),
        organization_name: Set("Acme Institute".to_string()),
        contact_person: Set("Rahul Nair".to_string()),
        contact_email: Set("coordinator@acme.edu".to_string()),
        contact_phone: Set(None),
        status: Set(SeminarStatus::Approved),
        registration_enabled: Set(registration_enabled),
        certificate_enabled: Set(certificate_enabled),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        approved_at: Set(Some(now)),
        approved_by: Set(None),
    };
    SeminarRepository::create(model, db).await.expect("seed seminar")
}

pub async fn seed_verified_registration(
    db: &DatabaseConnection,
    seminar_id: Uuid,
    name: &str,
    email: &str,
) -> RegistrationModel {
    seed_registration(db, seminar_id, name, email, true).await
}

pub async fn seed_unverified_registration(
    db: &DatabaseConnection,
    seminar_id: Uuid,
    name: &str,
    email: &str,
) -> RegistrationModel {
    seed_registration(db, seminar_id, name, email, false).await
}

async fn seed_registration(
    db: &DatabaseConnection,
    seminar_id: Uuid,
    name: &str,
    email: &str,
    verified: bool,
) -> RegistrationModel {
    use certhub_repository::RegistrationRepository;

    let now = Utc::now();
    let model = RegistrationActiveModel {
        id: Set(Uuid::new_v4()),
        seminar_id: Set(seminar_id),
        full_name: Set(name.to_string()),
        email: Set(email.to_string()),
        phone: Set(None),
        college_name: Set(Some("Acme College".to_string())),
        year: Set(None),
        city_state: Set(None),
        email_verified: Set(verified),
        attended: Set(verified),
        registered_at: Set(now),
        verified_at: Set(if verified { Some(now) } else { None }),
    };
    RegistrationRepository::create(model, db)
        .await
        .expect("seed registration")
}

/// Read the active code straight from storage; tests are not going to parse
/// it back out of an email body.
pub async fn active_code(
    db: &DatabaseConnection,
    email: &str,
    purpose: certhub_models::enums::OtpPurpose,
    seminar_id: Option<Uuid>,
) -> String {
    use certhub_repository::OtpRepository;

    OtpRepository::find_active(email, purpose, seminar_id, db)
        .await
        .expect("query otp")
        .expect("active otp present")
        .otp_code
}
