use thiserror::Error;

/// Verification failures for one-time codes.
///
/// Every variant is an expected outcome with a user-facing message; the
/// messages deliberately avoid revealing whether an OTP row exists for a
/// different purpose or context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("No OTP found. Please request a new one.")]
    InvalidCode,
    #[error("OTP has expired. Please request a new one.")]
    Expired,
    #[error("Too many failed attempts. Please request a new OTP.")]
    TooManyAttempts,
    #[error("Invalid OTP. Please try again.")]
    Mismatch,
}
