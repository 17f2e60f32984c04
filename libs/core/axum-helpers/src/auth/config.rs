//! JWT settings loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

/// Default token lifetime in seconds.
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Longest accepted token lifetime: ten years.
pub const MAX_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required): at least 32 characters
/// - `JWT_EXPIRES_IN` (optional): token lifetime in seconds, defaults to 300,
///   at most [`MAX_TTL_SECONDS`]
///
/// ```ignore
/// let config = JwtConfig::from_env()?;
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars")?.with_ttl(60)?;
/// ```
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Lifetime of issued tokens, in seconds
    pub ttl_seconds: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;
        Ok(Self {
            secret,
            ttl_seconds: DEFAULT_TTL_SECONDS,
        })
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Result<Self, ConfigError> {
        check_ttl(ttl_seconds)?;
        self.ttl_seconds = ttl_seconds;
        Ok(self)
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                secret.len()
            ),
        });
    }
    Ok(())
}

fn check_ttl(ttl_seconds: i64) -> Result<(), ConfigError> {
    if ttl_seconds <= 0 {
        return Err(ConfigError::ParseError {
            key: "JWT_EXPIRES_IN".to_string(),
            details: format!("must be a positive number of seconds (got {ttl_seconds})"),
        });
    }
    if ttl_seconds > MAX_TTL_SECONDS {
        return Err(ConfigError::ParseError {
            key: "JWT_EXPIRES_IN".to_string(),
            details: format!("must be at most {MAX_TTL_SECONDS} seconds (got {ttl_seconds})"),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        let ttl_seconds = env_parse_or("JWT_EXPIRES_IN", DEFAULT_TTL_SECONDS)?;
        Self::new(secret)?.with_ttl(ttl_seconds)
    }
}
