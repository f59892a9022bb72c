//! Bearer-token verification against the identity provider's JWKS.
//!
//! Verification walks: token header -> key id -> cached public key ->
//! RS256 signature + exp/aud/iss checks -> claims. The key cache is owned
//! here and shared through application state; see [`jwks::JwksCache`].

pub mod jwks;

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;
use self::jwks::JwksCache;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Authorization header must use Bearer token format")]
    InvalidHeader,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token claims (audience or issuer mismatch)")]
    ClaimsMismatch,

    #[error("Token missing required claim: {0}")]
    MissingClaim(&'static str),

    #[error("Unable to find appropriate signing key")]
    UnknownKey,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unable to fetch identity provider keys: {0}")]
    KeySetFetch(String),
}

/// Claims extracted from a verified token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Identity used to resolve or provision the local user row
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub auth0_id: String,
    pub email: String,
    pub name: String,
}

impl Claims {
    /// `sub` and `email` are required; a missing `name` falls back to the
    /// email address.
    pub fn identity(&self) -> Result<UserIdentity, AuthError> {
        if self.sub.is_empty() {
            return Err(AuthError::MissingClaim("sub"));
        }
        let email = match self.email.as_deref() {
            Some(email) if !email.is_empty() => email.to_string(),
            _ => return Err(AuthError::MissingClaim("email")),
        };
        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => email.clone(),
        };
        Ok(UserIdentity { auth0_id: self.sub.clone(), email, name })
    }
}

/// Verifies bearer tokens; owns the signing-key cache
pub struct TokenVerifier {
    jwks: JwksCache,
    audience: String,
    issuer: String,
}

impl TokenVerifier {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            jwks: JwksCache::new(auth.jwks_url(), std::time::Duration::from_secs(auth.jwks_ttl_secs)),
            audience: auth.audience.clone(),
            issuer: auth.issuer(),
        }
    }

    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header.kid.ok_or(AuthError::UnknownKey)?;

        let key = self.jwks.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &key, &validation).map_err(map_jwt_error)?;
        Ok(data.claims)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::ClaimsMismatch,
        _ => AuthError::InvalidToken(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, email: Option<&str>, name: Option<&str>) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: email.map(String::from),
            name: name.map(String::from),
            exp: 4102444800,
            iat: None,
        }
    }

    #[test]
    fn identity_requires_sub_and_email() {
        assert!(matches!(
            claims("", Some("a@b.example"), None).identity(),
            Err(AuthError::MissingClaim("sub"))
        ));
        assert!(matches!(
            claims("auth0|123", None, None).identity(),
            Err(AuthError::MissingClaim("email"))
        ));
    }

    #[test]
    fn identity_name_falls_back_to_email() {
        let identity = claims("auth0|123", Some("a@b.example"), None).identity().unwrap();
        assert_eq!(identity.name, "a@b.example");

        let identity =
            claims("auth0|123", Some("a@b.example"), Some("Robin")).identity().unwrap();
        assert_eq!(identity.name, "Robin");
    }

    #[test]
    fn expired_tokens_map_to_expired() {
        let err: jsonwebtoken::errors::Error =
            jsonwebtoken::errors::ErrorKind::ExpiredSignature.into();
        assert!(matches!(map_jwt_error(err), AuthError::Expired));
    }

    #[tokio::test]
    async fn garbage_tokens_fail_before_any_key_fetch() {
        let verifier = TokenVerifier::new(&crate::config::AuthConfig {
            domain: "example.invalid".to_string(),
            audience: "https://api.example.invalid".to_string(),
            jwks_ttl_secs: 60,
        });
        // Not a JWT at all: rejected while parsing the header, no network
        assert!(matches!(
            verifier.verify("not-a-token").await,
            Err(AuthError::InvalidToken(_))
        ));
    }
}
