use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv};
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Allowed browser origins.
///
/// `CORS_ALLOWED_ORIGIN` holds a comma-separated list. When unset no CORS
/// layer is installed and cross-origin browser calls are refused.
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    pub fn is_enabled(&self) -> bool {
        !self.allowed_origins.is_empty()
    }

    /// Parse a comma-separated origin list.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::ParseError {
                    key: "CORS_ALLOWED_ORIGIN".to_string(),
                    details: format!("{origin}: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { allowed_origins })
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// CORS layer for the configured origins, or `None` when CORS is disabled.
///
/// Allows the CRUD verbs plus the `Content-Type`, `Authorization` and
/// `Accept` headers, cached for an hour.
pub fn create_cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if !config.is_enabled() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(config.allowed_origins.clone())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600)),
    )
}
