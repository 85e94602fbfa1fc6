//! Application builder: wires state, router and middleware, then serves.

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use entityhub_core::config::AppConfig;
use entityhub_core::error::{AppError, ErrorKind};
use entityhub_database::RepositorySet;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over `store`.
pub fn build_app(config: AppConfig, store: RepositorySet) -> Router {
    build_router(AppState::new(config, store))
}

/// Serve the API until Ctrl-C, then release the store.
pub async fn run_server(config: AppConfig, store: RepositorySet) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(config, store.clone());

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!("EntityHub listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    server
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    if tokio::time::timeout(grace, store.close()).await.is_err() {
        warn!(grace_seconds = grace.as_secs(), "Store did not close within the grace period");
    }
    info!("EntityHub stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C; shutting down"),
    }
}
