//! Application state management

use axum_helpers::JwtAuth;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub jwt: Arc<JwtAuth>,
}
