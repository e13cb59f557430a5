//! HS256 token issuing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::{validate_claims, JwtClaims, TokenValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed or badly signed token: {0}")]
    Invalid(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Verifies a bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Shared-secret (HS256) validator.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time checks run against the caller's clock in `validate_claims`.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

/// Issues HS256 tokens for the dev login.
pub struct TokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_ref()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(
        &self,
        sub: lodgex_core::UserId,
        name: &str,
        role: crate::Role,
        now: DateTime<Utc>,
    ) -> Result<(String, JwtClaims), TokenError> {
        let claims = JwtClaims::new(sub, name, role, now, self.ttl);
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| TokenError::Encode(e.to_string()))?;
        Ok((token, claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use lodgex_core::UserId;

    #[test]
    fn issued_token_validates_with_same_secret() {
        let issuer = TokenIssuer::new("s3cret", Duration::minutes(30));
        let now = Utc::now();
        let (token, claims) = issuer.issue(UserId::new(), "Admin User", Role::Admin, now).unwrap();

        let validator = Hs256JwtValidator::new("s3cret");
        assert_eq!(validator.validate(&token, now).unwrap(), claims);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = TokenIssuer::new("s3cret", Duration::minutes(30));
        let now = Utc::now();
        let (token, _) = issuer.issue(UserId::new(), "Admin User", Role::Admin, now).unwrap();

        let validator = Hs256JwtValidator::new("other");
        assert!(matches!(validator.validate(&token, now), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expiry_uses_supplied_clock() {
        let issuer = TokenIssuer::new("s3cret", Duration::minutes(30));
        let now = Utc::now();
        let (token, _) = issuer.issue(UserId::new(), "Elena Cleaner", Role::Cleaner, now).unwrap();

        let validator = Hs256JwtValidator::new("s3cret");
        assert_eq!(
            validator.validate(&token, now + Duration::hours(1)),
            Err(TokenError::Claims(TokenValidationError::Expired))
        );
    }
}
