//! HS256 session tokens.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use yams_core::PlayerId;

use crate::claims::{Claims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, or not a JWT at all.
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Verifies a presented token and yields its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError>;
}

/// Mints tokens for authenticated players.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, sub: PlayerId, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Symmetric HS256 signer/validator built from an explicit secret.
#[derive(Clone)]
pub struct Hs256Tokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256Tokens {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn validation() -> Validation {
        // Time checks are done by `validate_claims` against an injected clock.
        let mut v = Validation::new(Algorithm::HS256);
        v.validate_exp = false;
        v.required_spec_claims = HashSet::new();
        v
    }
}

impl core::fmt::Debug for Hs256Tokens {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Tokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for Hs256Tokens {
    fn issue(&self, sub: PlayerId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(sub, now, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl JwtValidator for Hs256Tokens {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Self::validation())
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(secret: &str) -> Hs256Tokens {
        Hs256Tokens::new(secret.as_bytes(), Duration::hours(1))
    }

    #[test]
    fn issued_token_validates_to_same_subject() {
        let t = tokens("s3cret");
        let now = Utc::now();
        let player = PlayerId::new();

        let token = t.issue(player, now).unwrap();
        let claims = t.validate(&token, now).unwrap();
        assert_eq!(claims.sub, player);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_expires_after_ttl() {
        let t = tokens("s3cret");
        let now = Utc::now();
        let token = t.issue(PlayerId::new(), now).unwrap();

        let err = t.validate(&token, now + Duration::minutes(61)).unwrap_err();
        assert_eq!(err, TokenError::Claims(TokenValidationError::Expired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now();
        let token = tokens("one").issue(PlayerId::new(), now).unwrap();
        assert!(matches!(
            tokens("two").validate(&token, now),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            tokens("s3cret").validate("not.a.jwt", Utc::now()),
            Err(TokenError::Malformed(_))
        ));
    }
}
