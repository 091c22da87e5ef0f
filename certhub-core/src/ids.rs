use certhub_models::constants::{
    CERTIFICATE_ID_ALPHABET, CERTIFICATE_ID_PREFIX, CERTIFICATE_ID_RANDOM_LEN,
};
use rand::Rng;

/// Generate a public certificate number, e.g. `ZX-7KQ4M`.
///
/// The random part draws from an alphabet without 0/O/1/I. Uniqueness is
/// enforced by the database index; callers retry on collision.
pub fn generate_certificate_id() -> String {
    let mut rng = rand::thread_rng();
    let random: String = (0..CERTIFICATE_ID_RANDOM_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CERTIFICATE_ID_ALPHABET.len());
            CERTIFICATE_ID_ALPHABET[idx] as char
        })
        .collect();
    format!("{CERTIFICATE_ID_PREFIX}{random}")
}

/// Six-digit one-time code, zero-padded.
pub fn generate_otp_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// Storage key of the archived PDF for a public certificate number.
pub fn artifact_key(certificate_id: &str) -> String {
    format!("certificates/{certificate_id}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_id_shape() {
        for _ in 0..100 {
            let id = generate_certificate_id();
            assert_eq!(id.len(), 8);
            assert!(id.starts_with("ZX-"));
            for c in id[3..].chars() {
                assert!(!"0O1I".contains(c), "ambiguous char in {id}");
            }
        }
    }

    #[test]
    fn test_otp_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
