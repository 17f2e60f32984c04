use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre for report rendering in `main`.
///
/// Call this before any fallible startup work. Returns `false` when a hook
/// was already installed; the earlier hook stays in place.
pub fn install_color_eyre() -> bool {
    match color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install()
    {
        Ok(()) => true,
        Err(e) => {
            debug!("color-eyre hook not installed: {}", e);
            false
        }
    }
}

fn default_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info,sea_orm=warn,sqlx=warn")
        } else {
            EnvFilter::new("debug,hyper=info,h2=info")
        }
    })
}

/// Initialize tracing for the given environment.
///
/// - **Production**: JSON lines, no module targets, `info` by default.
/// - **Development**: pretty output, `debug` by default.
///
/// Both include [`tracing_error::ErrorLayer`] so `eyre` reports carry span traces.
/// `RUST_LOG` overrides the default filter. A second call is a no-op, which keeps
/// tests that each initialize tracing from failing.
pub fn init_tracing(environment: &Environment) {
    let filter = default_filter(environment);

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(environment = ?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
