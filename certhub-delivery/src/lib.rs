//! Outbound collaborators: transactional email, certificate PDF rendering,
//! and artifact archival. Everything here is behind a trait so workflows can
//! be exercised against fakes.

pub mod artifact;
pub mod mailer;
pub mod render;
pub mod templates;

pub use artifact::{ArtifactStore, NullArtifactStore, S3ArtifactStore};
pub use mailer::{EmailAttachment, EmailMessage, Mailer, ResendMailer};
pub use render::{CertificateRenderer, PdfCertificateRenderer};
