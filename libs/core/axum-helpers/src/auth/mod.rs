//! Bearer token authentication.
//!
//! - [`JwtAuth`] issues and verifies HS256 tokens carrying `{sub, exp}`
//! - [`jwt_auth_middleware`] gates a router on a valid token
//! - [`AuthenticatedUser`] is the typed identity handlers extract
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let jwt = Arc::new(JwtAuth::new(&JwtConfig::from_env()?));
//!
//! let protected = Router::new()
//!     .route("/", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware::<JwtAuth>));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TokenError, TokenVerifier};
pub use middleware::{AuthenticatedUser, jwt_auth_middleware};
