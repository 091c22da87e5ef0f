use std::sync::Arc;

use certhub_delivery::{templates, EmailMessage, Mailer};
use certhub_error::{delivery::DeliveryError, CertError, CertResult};
use certhub_models::{
    constants::{FAILED_EMAILS_CAP, NOTIFY_BATCH_SIZE},
    domain::NotifySummary,
    entities::prelude::SeminarModel,
};
use certhub_repository::{CertificateRepository, RegistrationRepository, SeminarRepository};
use futures::future::join_all;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

/// Bulk email fan-out to seminar audiences.
///
/// Sends run in concurrent batches of [`NOTIFY_BATCH_SIZE`], batches
/// sequentially, so one large seminar cannot flood the provider. Partial
/// failure is a success with accounting; only a total failure errors.
#[derive(Clone)]
pub struct NotifyService {
    db: DatabaseConnection,
    mailer: Arc<dyn Mailer>,
    base_url: String,
}

impl NotifyService {
    pub fn new(db: DatabaseConnection, mailer: Arc<dyn Mailer>, base_url: String) -> Self {
        NotifyService {
            db,
            mailer,
            base_url,
        }
    }

    /// Tell every verified registrant their certificate can be claimed.
    /// Refused while certificates are disabled or nobody has verified.
    pub async fn notify_students(&self, seminar_id: Uuid) -> CertResult<NotifySummary> {
        let seminar = self.seminar(seminar_id).await?;
        if !seminar.certificate_enabled {
            return Err(CertError::Validation(
                "Certificates are not yet available for this seminar.".into(),
            ));
        }

        let registrations =
            RegistrationRepository::find_verified_by_seminar(seminar_id, &self.db).await?;
        if registrations.is_empty() {
            return Err(CertError::Validation(
                "This seminar has no verified registrations to notify.".into(),
            ));
        }

        let claim_url = format!("{}/certificates?seminar={}", self.base_url, seminar.id);
        let messages: Vec<EmailMessage> = registrations
            .iter()
            .map(|r| templates::certificates_available(&r.email, &r.full_name, &seminar, &claim_url))
            .collect();

        self.fan_out(messages).await
    }

    /// Send a custom announcement to every verified registrant.
    pub async fn broadcast(
        &self,
        seminar_id: Uuid,
        subject: &str,
        body: &str,
    ) -> CertResult<NotifySummary> {
        let _ = self.seminar(seminar_id).await?;

        let messages: Vec<EmailMessage> =
            RegistrationRepository::find_verified_by_seminar(seminar_id, &self.db)
                .await?
                .iter()
                .map(|r| templates::broadcast(&r.email, &r.full_name, subject, body))
                .collect();

        self.fan_out(messages).await
    }

    /// Send the seminar coordinator a status summary.
    pub async fn notify_coordinator(&self, seminar_id: Uuid) -> CertResult<()> {
        let seminar = self.seminar(seminar_id).await?;
        let registrations =
            RegistrationRepository::count_by_seminar(seminar_id, &self.db).await?;
        let certificates = CertificateRepository::page_by_seminar(seminar_id, 1, 1, &self.db)
            .await?
            .total;

        let body = format!(
            "Your seminar currently has {registrations} registration(s) and {certificates} issued certificate(s)."
        );
        let message = templates::broadcast(
            &seminar.contact_email,
            &seminar.contact_person,
            &format!("Status update: {}", seminar.title),
            &body,
        );
        self.mailer.send(&message).await?;
        Ok(())
    }

    /// Batched send. Returns per-address accounting; errors only when every
    /// single send failed.
    async fn fan_out(&self, messages: Vec<EmailMessage>) -> CertResult<NotifySummary> {
        let total = messages.len();
        let mut sent = 0usize;
        let mut failed_emails: Vec<String> = Vec::new();

        for batch in messages.chunks(NOTIFY_BATCH_SIZE) {
            let results = join_all(batch.iter().map(|m| self.mailer.send(m))).await;
            for (message, result) in batch.iter().zip(results) {
                match result {
                    Ok(()) => sent += 1,
                    Err(e) => {
                        warn!(to = %message.to_email, error = %e, "notification failed");
                        if failed_emails.len() < FAILED_EMAILS_CAP {
                            failed_emails.push(message.to_email.clone());
                        }
                    }
                }
            }
        }

        let failed = total - sent;
        if total > 0 && sent == 0 {
            return Err(CertError::Delivery(DeliveryError::Email(format!(
                "all {total} notifications failed"
            ))));
        }

        info!(sent, failed, total, "notification fan-out complete");
        Ok(NotifySummary {
            sent,
            failed,
            total,
            failed_emails,
        })
    }

    async fn seminar(&self, seminar_id: Uuid) -> CertResult<SeminarModel> {
        SeminarRepository::find_by_id(seminar_id, &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("seminar".into()))
    }
}
