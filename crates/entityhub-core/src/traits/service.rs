//! Service traits: the invariant-enforcing layer above repositories.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::traits::repository::Repository;
use crate::types::filter::QueryFilter;
use crate::types::pagination::PagedResult;

/// Business operations over one entity type.
///
/// Services do not run structural validation; the presentation adapter
/// does that before calling [`EntityService::add`] or
/// [`EntityService::update`]. Services enforce domain rules and report
/// breaches as `ErrorKind::DomainRule`.
#[async_trait]
pub trait EntityService<T: Entity>: Send + Sync + 'static {
    /// All entities.
    async fn get(&self) -> AppResult<Vec<T>>;

    /// One entity by identifier.
    async fn get_by_id(&self, id: T::Id) -> AppResult<Option<T>>;

    /// A filtered page.
    async fn search(&self, filter: &QueryFilter) -> AppResult<PagedResult<T>>;

    /// Create an entity after domain rules pass.
    async fn add(&self, entity: T) -> AppResult<T>;

    /// Replace an existing entity.
    async fn update(&self, entity: T) -> AppResult<T>;

    /// Delete an existing entity.
    async fn delete_by_id(&self, id: T::Id) -> AppResult<()>;
}

/// A domain rule checked before an entity is created.
///
/// Returning an error aborts the create before the repository is called.
#[async_trait]
pub trait CreateGuard<T: Entity>: Send + Sync + 'static {
    /// Short rule name used in logs.
    fn name(&self) -> &str;

    /// Check `candidate` against the current store contents.
    async fn check(&self, candidate: &T, repo: &dyn Repository<T>) -> AppResult<()>;
}
