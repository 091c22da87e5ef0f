//! JSON Web Token (JWT) utilities for encoding and decoding tokens.
use jsonwebtoken::{
    decode, encode, errors::Error as JwtError, Algorithm, DecodingKey, EncodingKey, Header,
    TokenData, Validation,
};
use serde::{de::DeserializeOwned, Serialize};

#[inline]
pub fn encode_jwt<T: Serialize>(
    claims: &T,
    secret: &[u8],
    algorithm: Option<Algorithm>,
) -> Result<String, JwtError> {
    let header = Header::new(algorithm.unwrap_or(Algorithm::HS256));
    encode(&header, claims, &EncodingKey::from_secret(secret))
}

#[inline]
pub fn decode_jwt<T: DeserializeOwned>(
    token: &str,
    secret: &[u8],
    validation: Option<Validation>,
) -> Result<TokenData<T>, JwtError> {
    let validation = validation.unwrap_or_default();
    decode::<T>(token, &DecodingKey::from_secret(secret), &validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let claims = TestClaims {
            sub: "admin@example.com".into(),
            exp: 4_102_444_800, // far future
        };
        let token = encode_jwt(&claims, b"secret", None).unwrap();
        let decoded = decode_jwt::<TestClaims>(&token, b"secret", None).unwrap();
        assert_eq!(decoded.claims.sub, "admin@example.com");
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let claims = TestClaims {
            sub: "admin@example.com".into(),
            exp: 4_102_444_800,
        };
        let token = encode_jwt(&claims, b"secret", None).unwrap();
        assert!(decode_jwt::<TestClaims>(&token, b"other", None).is_err());
    }
}
