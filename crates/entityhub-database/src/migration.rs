//! Schema bootstrap for the PostgreSQL backend.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use entityhub_core::error::{AppError, ErrorKind};
use entityhub_core::result::AppResult;

/// Migrations bundled from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every migration not yet recorded in the database.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!(available = MIGRATOR.iter().count(), "Applying migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Migration failed", e)
            .in_context("migration", "run")
    })?;

    info!("Schema up to date");
    Ok(())
}
