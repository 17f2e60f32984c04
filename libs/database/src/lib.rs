//! Database connectivity for the catalog service.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//! use core_config::FromEnv;
//!
//! let db = connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
