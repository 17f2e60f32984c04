use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id
    pub sub: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token lifetime of {0}s is out of range")]
    TtlOutOfRange(i64),
}

/// Verifies bearer tokens. The access gate only depends on this trait.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<JwtClaims, TokenError>;
}

/// HS256 token issuer and verifier.
///
/// Keys are derived once from [`JwtConfig`] and never change, so a single
/// instance can be shared across request tasks behind an `Arc`.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        tracing::info!(ttl_seconds = config.ttl_seconds, "JWT auth initialized");

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Default lifetime for tokens handed out by the token endpoint.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign `{sub: user_id, exp: now + ttl_seconds}`.
    ///
    /// A negative TTL produces a token that is already expired. A TTL that
    /// does not fit a timestamp is rejected with [`TokenError::TtlOutOfRange`].
    pub fn issue(&self, user_id: Uuid, ttl_seconds: i64) -> Result<String, TokenError> {
        let exp = Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or(TokenError::TtlOutOfRange(ttl_seconds))?;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl TokenVerifier for JwtAuth {
    fn verify(&self, token: &str) -> Result<JwtClaims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        data.claims.user_id()?;
        Ok(data.claims)
    }
}
