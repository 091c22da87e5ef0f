//! Outbound email builders.
//!
//! Plain inline-styled HTML; every builder returns a ready [`EmailMessage`]
//! so workflows only decide when to send, never how the mail looks.

use crate::mailer::{EmailAttachment, EmailMessage};
use certhub_models::entities::prelude::{CertificateModel, SeminarModel};

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2937; max-width: 600px; margin: 0 auto; padding: 24px;">
  <h2 style="color: #111827;">{title}</h2>
  {body}
  <hr style="border: none; border-top: 1px solid #e5e7eb; margin-top: 32px;" />
  <p style="font-size: 12px; color: #6b7280;">This is an automated message. Please do not reply.</p>
</body>
</html>"#
    )
}

/// Verification code mail, shared by the registration and certificate flows.
pub fn otp_email(to_email: &str, code: &str, action: &str, expiry_minutes: i64) -> EmailMessage {
    let body = format!(
        r#"<p>Use this code to {action}:</p>
  <p style="font-size: 32px; font-weight: bold; letter-spacing: 8px; color: #2563eb;">{code}</p>
  <p>The code expires in {expiry_minutes} minutes. If you did not request it, ignore this email.</p>"#
    );
    EmailMessage {
        to_email: to_email.to_string(),
        to_name: None,
        subject: format!("Your verification code: {code}"),
        html: layout("Verification Code", &body),
        attachment: None,
    }
}

pub fn registration_confirmed(
    to_email: &str,
    full_name: &str,
    seminar: &SeminarModel,
) -> EmailMessage {
    let body = format!(
        r#"<p>Hi {full_name},</p>
  <p>Your registration for <strong>{title}</strong> is confirmed.</p>
  <ul>
    <li>Date: {date}</li>
    <li>Time: {time}</li>
    <li>Speaker: {speaker}</li>
  </ul>
  <p>We look forward to seeing you there.</p>"#,
        title = seminar.title,
        date = seminar.date,
        time = seminar.time,
        speaker = seminar.speaker_name,
    );
    EmailMessage {
        to_email: to_email.to_string(),
        to_name: Some(full_name.to_string()),
        subject: format!("Registration confirmed: {}", seminar.title),
        html: layout("Registration Confirmed", &body),
        attachment: None,
    }
}

/// Certificate delivery mail with the rendered PDF attached.
pub fn certificate_email(
    certificate: &CertificateModel,
    pdf: Vec<u8>,
    download_url: &str,
) -> EmailMessage {
    let body = format!(
        r#"<p>Hi {name},</p>
  <p>Congratulations! Your certificate of participation for
  <strong>{title}</strong> is attached.</p>
  <p>Certificate number: <strong>{cert_id}</strong></p>
  <p>You can also download it any time from
  <a href="{download_url}">{download_url}</a>.</p>"#,
        name = certificate.recipient_name,
        title = certificate.seminar_title,
        cert_id = certificate.certificate_id,
    );
    EmailMessage {
        to_email: certificate.recipient_email.clone(),
        to_name: Some(certificate.recipient_name.clone()),
        subject: format!("Your certificate for {}", certificate.seminar_title),
        html: layout("Your Certificate", &body),
        attachment: Some(EmailAttachment {
            filename: format!("{}.pdf", certificate.certificate_id),
            content: pdf,
        }),
    }
}

/// Tells registrants their certificate can now be claimed.
pub fn certificates_available(
    to_email: &str,
    full_name: &str,
    seminar: &SeminarModel,
    claim_url: &str,
) -> EmailMessage {
    let body = format!(
        r#"<p>Hi {full_name},</p>
  <p>Certificates for <strong>{title}</strong> are now available.</p>
  <p>Claim yours here: <a href="{claim_url}">{claim_url}</a></p>"#,
        title = seminar.title,
    );
    EmailMessage {
        to_email: to_email.to_string(),
        to_name: Some(full_name.to_string()),
        subject: format!("Your certificate for {} is ready", seminar.title),
        html: layout("Certificate Available", &body),
        attachment: None,
    }
}

/// Heads-up to the seminar coordinator that a certificate was issued.
pub fn coordinator_certificate_alert(
    seminar: &SeminarModel,
    certificate: &CertificateModel,
) -> EmailMessage {
    let body = format!(
        r#"<p>Hi {contact},</p>
  <p>A participation certificate was issued for your seminar
  <strong>{title}</strong>.</p>
  <ul>
    <li>Recipient: {recipient} ({email})</li>
    <li>Certificate number: {cert_id}</li>
  </ul>"#,
        contact = seminar.contact_person,
        title = seminar.title,
        recipient = certificate.recipient_name,
        email = certificate.recipient_email,
        cert_id = certificate.certificate_id,
    );
    EmailMessage {
        to_email: seminar.contact_email.clone(),
        to_name: Some(seminar.contact_person.clone()),
        subject: format!("Certificate issued for {}", seminar.title),
        html: layout("Certificate Issued", &body),
        attachment: None,
    }
}

pub fn name_request_approved(
    to_email: &str,
    requested_name: &str,
    seminar_title: &str,
) -> EmailMessage {
    let body = format!(
        r#"<p>Hi {requested_name},</p>
  <p>Your name correction request for <strong>{seminar_title}</strong> was
  approved. Your certificate has been issued with the corrected name and is
  attached to a separate email.</p>"#
    );
    EmailMessage {
        to_email: to_email.to_string(),
        to_name: Some(requested_name.to_string()),
        subject: "Name correction approved".to_string(),
        html: layout("Request Approved", &body),
        attachment: None,
    }
}

pub fn name_request_rejected(
    to_email: &str,
    registered_name: &str,
    seminar_title: &str,
    notes: Option<&str>,
) -> EmailMessage {
    let notes_html = notes
        .map(|n| format!("<p>Reviewer notes: {n}</p>"))
        .unwrap_or_default();
    let body = format!(
        r#"<p>Hi {registered_name},</p>
  <p>Your name correction request for <strong>{seminar_title}</strong> was
  not approved. Your certificate has been issued with the name on your
  registration.</p>
  {notes_html}"#
    );
    EmailMessage {
        to_email: to_email.to_string(),
        to_name: Some(registered_name.to_string()),
        subject: "Name correction request update".to_string(),
        html: layout("Request Reviewed", &body),
        attachment: None,
    }
}

/// Free-form announcement sent to verified registrants.
pub fn broadcast(to_email: &str, to_name: &str, subject: &str, message: &str) -> EmailMessage {
    let body = format!(
        r#"<p>Hi {to_name},</p>
  <p>{message}</p>"#
    );
    EmailMessage {
        to_email: to_email.to_string(),
        to_name: Some(to_name.to_string()),
        subject: subject.to_string(),
        html: layout(subject, &body),
        attachment: None,
    }
}
