//! EntityHub Server: generic entity CRUD over HTTP.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use entityhub_core::config::AppConfig;
use entityhub_core::error::AppError;
use entityhub_database::RepositorySet;

#[tokio::main]
async fn main() {
    let env = std::env::var("ENTITYHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Open the store and serve until shutdown
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        backend = %config.database.backend,
        "Starting EntityHub v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = RepositorySet::open(&config.database).await?;
    entityhub_api::run_server(config, store).await
}
