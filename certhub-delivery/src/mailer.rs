use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use certhub_error::{delivery::DeliveryError, DeliveryResult};
use certhub_models::settings::Email;
use serde::Serialize;
use tracing::debug;

/// A file attached to an outbound email (certificate PDFs).
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to_email: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html: String,
    pub attachment: Option<EmailAttachment>,
}

/// Transactional email sender.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> DeliveryResult<()>;

    /// False when no API key is present; callers decide whether that is an
    /// error or a silent skip.
    fn is_configured(&self) -> bool;
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentBody<'a>>,
}

#[derive(Debug, Serialize)]
struct AttachmentBody<'a> {
    filename: &'a str,
    content: String,
}

/// Mailer speaking the Resend JSON HTTP API.
pub struct ResendMailer {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    sender: String,
}

impl ResendMailer {
    pub fn new(config: &Email) -> Self {
        ResendMailer {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            sender: format!("{} <{}>", config.sender_name, config.sender_email),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> DeliveryResult<()> {
        if !self.is_configured() {
            return Err(DeliveryError::Email("email sender not configured".into()));
        }

        let body = SendEmailBody {
            from: self.sender.clone(),
            to: vec![message.to_email.as_str()],
            subject: &message.subject,
            html: &message.html,
            attachments: message
                .attachment
                .iter()
                .map(|a| AttachmentBody {
                    filename: &a.filename,
                    content: BASE64.encode(&a.content),
                })
                .collect(),
        };

        let resp = self
            .http
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Email(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            debug!(to = %message.to_email, subject = %message.subject, "email sent");
            return Ok(());
        }

        let detail = resp.text().await.unwrap_or_default();
        Err(DeliveryError::Email(format!(
            "send failed (status={status}): {detail}"
        )))
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
