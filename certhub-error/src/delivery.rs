use thiserror::Error;

/// Failures of the outbound collaborators.
///
/// These must stay distinguishable from success: registration and
/// certificate flows abort when the recipient never got the code, while
/// artifact deletion failures are tolerated during cleanup.
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    #[error("email send failed: {0}")]
    Email(String),
    #[error("certificate render failed: {0}")]
    Render(String),
    #[error("artifact storage failed: {0}")]
    Artifact(String),
}
