//! Generic CRUD service with pluggable create guards.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use entityhub_core::result::AppResult;
use entityhub_core::traits::{CreateGuard, Entity, EntityService, Repository};
use entityhub_core::types::{PagedResult, QueryFilter};

/// CRUD over one repository, with domain rules run before every create.
///
/// Reads, updates and deletes pass straight through. `add` runs each
/// guard in registration order and stops at the first failure, in which
/// case the repository is never called.
pub struct CrudService<T: Entity> {
    /// Name used in logs and error contexts.
    component: &'static str,
    /// Backing repository.
    repo: Arc<dyn Repository<T>>,
    /// Rules checked before create.
    guards: Vec<Arc<dyn CreateGuard<T>>>,
}

impl<T: Entity> CrudService<T> {
    /// Creates a service without any guards.
    pub fn new(component: &'static str, repo: Arc<dyn Repository<T>>) -> Self {
        Self {
            component,
            repo,
            guards: Vec::new(),
        }
    }

    /// Registers a guard to run before create.
    pub fn with_guard(mut self, guard: impl CreateGuard<T>) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }
}

impl<T: Entity> fmt::Debug for CrudService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudService")
            .field("component", &self.component)
            .field(
                "guards",
                &self.guards.iter().map(|g| g.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Entity> EntityService<T> for CrudService<T> {
    async fn get(&self) -> AppResult<Vec<T>> {
        self.repo.get().await
    }

    async fn get_by_id(&self, id: T::Id) -> AppResult<Option<T>> {
        self.repo.get_by_id(id).await
    }

    #[instrument(skip(self, filter), fields(component = self.component))]
    async fn search(&self, filter: &QueryFilter) -> AppResult<PagedResult<T>> {
        let page = self.repo.search(filter).await?;
        debug!(total = page.total, returned = page.items.len(), "Search complete");
        Ok(page)
    }

    #[instrument(skip(self, entity), fields(component = self.component))]
    async fn add(&self, entity: T) -> AppResult<T> {
        for guard in &self.guards {
            if let Err(err) = guard.check(&entity, self.repo.as_ref()).await {
                if err.is_domain_rule() {
                    warn!(rule = guard.name(), error = %err.message, "Create rejected");
                }
                return Err(err);
            }
        }

        let stored = self.repo.add(entity).await?;
        info!(id = %stored.id(), "{} created", T::NAME);
        Ok(stored)
    }

    #[instrument(skip(self, entity), fields(component = self.component, id = %entity.id()))]
    async fn update(&self, entity: T) -> AppResult<T> {
        let stored = self.repo.update(entity).await?;
        info!("{} updated", T::NAME);
        Ok(stored)
    }

    #[instrument(skip(self), fields(component = self.component))]
    async fn delete_by_id(&self, id: T::Id) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;
        info!("{} deleted", T::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use entityhub_core::AppError;
    use entityhub_core::traits::EntityId;
    use entityhub_core::types::TeamId;
    use entityhub_database::MemoryRepository;
    use entityhub_entity::Team;

    use super::*;

    struct Deny;

    #[async_trait]
    impl CreateGuard<Team> for Deny {
        fn name(&self) -> &str {
            "deny"
        }

        async fn check(&self, _: &Team, _: &dyn Repository<Team>) -> AppResult<()> {
            Err(AppError::domain_rule("TestService", "add", "denied"))
        }
    }

    struct Count(Arc<AtomicUsize>);

    #[async_trait]
    impl CreateGuard<Team> for Count {
        fn name(&self) -> &str {
            "count"
        }

        async fn check(&self, _: &Team, _: &dyn Repository<Team>) -> AppResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn team() -> Team {
        Team {
            name: "core".into(),
            max_members: 3,
            ..Team::default()
        }
    }

    #[tokio::test]
    async fn test_add_without_guards_persists() {
        let service = CrudService::new("TestService", Arc::new(MemoryRepository::<Team>::new()));
        let stored = service.add(team()).await.unwrap();
        assert!(!stored.id.is_unset());
        assert_eq!(service.get().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_failing_guard_stops_create_and_later_guards() {
        let repo = Arc::new(MemoryRepository::<Team>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let service = CrudService::new("TestService", repo.clone())
            .with_guard(Count(calls.clone()))
            .with_guard(Deny)
            .with_guard(Count(calls.clone()));

        let err = service.add(team()).await.unwrap_err();
        assert!(err.is_domain_rule());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_missing_propagates_not_found() {
        let service = CrudService::new("TestService", Arc::new(MemoryRepository::<Team>::new()));
        let mut ghost = team();
        ghost.id = TeamId::new(999);
        let err = service.update(ghost).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
