//! Catalog API - product catalog with bearer-token access control

use axum_helpers::{JwtAuth, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = connect_from_config_with_retry(config.database.clone(), None).await?;
    run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let state = AppState {
        jwt: Arc::new(JwtAuth::new(&config.jwt)),
        config,
        db,
    };

    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state),
        health_router(state.config.app).merge(api::health::router(state.clone())),
        &state.config.cors,
    );

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let db = state.db.clone();
    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connections closed"),
                Err(e) => tracing::error!("Error closing PostgreSQL connections: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
