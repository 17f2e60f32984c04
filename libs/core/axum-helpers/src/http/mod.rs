//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - Per-request log line
//!
//! ```ignore
//! use axum_helpers::http::{CorsConfig, log_request, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn(log_request));
//! ```

pub mod cors;
pub mod request_log;
pub mod security;

pub use cors::{CorsConfig, create_cors_layer};
pub use request_log::log_request;
pub use security::security_headers;
