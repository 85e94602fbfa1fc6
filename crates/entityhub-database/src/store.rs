//! Backend selection: one repository per entity, all on the same store.

use std::sync::Arc;

use tracing::info;

use entityhub_core::config::{DatabaseBackend, DatabaseConfig};
use entityhub_core::result::AppResult;
use entityhub_core::traits::Repository;
use entityhub_entity::{Team, User};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{MemoryRepository, PgRepository};

/// Repositories for every entity EntityHub serves.
#[derive(Clone)]
pub struct RepositorySet {
    /// User repository.
    pub users: Arc<dyn Repository<User>>,
    /// Team repository.
    pub teams: Arc<dyn Repository<Team>>,
    /// Postgres pool, when that backend is in use.
    pub pool: Option<DatabasePool>,
}

impl RepositorySet {
    /// Fresh, empty in-memory repositories with the same unique keys as the
    /// Postgres schema.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(
                MemoryRepository::<User>::new()
                    .with_unique_key("login")
                    .with_unique_key("email"),
            ),
            teams: Arc::new(MemoryRepository::<Team>::new().with_unique_key("name")),
            pool: None,
        }
    }

    /// Repositories over an already connected Postgres pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            users: Arc::new(PgRepository::<User>::new(pool.pool().clone())),
            teams: Arc::new(PgRepository::<Team>::new(pool.pool().clone())),
            pool: Some(pool),
        }
    }

    /// Open the backend named in `config`, running migrations if asked to.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory store; data will not survive a restart");
                Ok(Self::in_memory())
            }
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
        }
    }

    /// Whether the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
