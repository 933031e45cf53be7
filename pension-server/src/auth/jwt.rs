//! JWT token service
//!
//! HS256 tokens carrying the user id, email and role.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JwtConfig;

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn expiration_minutes(&self) -> i64 {
        self.config.expiration_minutes
    }

    pub fn generate_token(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature, issuer, audience and expiry
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;
        Ok(data.claims)
    }

    /// Token part of an `Authorization: Bearer <token>` header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Authenticated caller, injected into request extensions by
/// [`super::require_auth`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(expiration_minutes: i64) -> JwtService {
        JwtService::new(JwtConfig {
            secret: "unit-test-secret-that-is-long-enough".into(),
            issuer: "pension-server".into(),
            audience: "pension-clients".into(),
            expiration_minutes,
        })
    }

    #[test]
    fn test_token_round_trip() {
        let jwt = service(60);
        let token = jwt.generate_token("user-1", "ops@epsc.local", "admin").unwrap();
        let user = CurrentUser::from(jwt.validate_token(&token).unwrap());
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "ops@epsc.local");
        assert!(user.is_admin());
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = service(-10);
        let token = jwt.generate_token("user-1", "ops@epsc.local", "admin").unwrap();
        assert!(matches!(jwt.validate_token(&token), Err(JwtError::ExpiredToken)));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let token = service(60).generate_token("u", "e@x.io", "admin").unwrap();
        let other = JwtService::new(JwtConfig {
            secret: "unit-test-secret-that-is-long-enough".into(),
            issuer: "pension-server".into(),
            audience: "someone-else".into(),
            expiration_minutes: 60,
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service(60).generate_token("u", "e@x.io", "admin").unwrap();
        let other = JwtService::new(JwtConfig {
            secret: "a-completely-different-secret-value".into(),
            issuer: "pension-server".into(),
            audience: "pension-clients".into(),
            expiration_minutes: 60,
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
    }
}
