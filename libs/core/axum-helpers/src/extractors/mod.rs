//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`AppError`](crate::errors::AppError), so handlers
//! never have to translate framework errors themselves.

pub mod json_body;
pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
