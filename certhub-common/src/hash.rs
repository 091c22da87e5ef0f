use bcrypt::{hash, verify};

/// Hash a password using bcrypt
///
/// # Example
/// ```
/// use certhub_common::hash::bcrypt_hash;
///
/// let hashed = bcrypt_hash("my_password");
/// ```
pub fn bcrypt_hash(password: &str) -> String {
    // Using unwrap here since bcrypt errors are very rare with valid input
    hash(password.as_bytes(), 8).unwrap()
}

/// Compare a plaintext password against a hashed password
///
/// # Example
/// ```
/// use certhub_common::hash::{bcrypt_hash, bcrypt_check};
///
/// let hash = bcrypt_hash("my_password");
/// assert!(bcrypt_check("my_password", &hash));
/// assert!(!bcrypt_check("wrong_password", &hash));
/// ```
pub fn bcrypt_check(password: &str, hash: &str) -> bool {
    verify(password.as_bytes(), hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_hash_and_check() {
        let password = "test_password";
        let hash = bcrypt_hash(password);

        assert!(bcrypt_check(password, &hash));
        assert!(!bcrypt_check("wrong_password", &hash));
    }
}
