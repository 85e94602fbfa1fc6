//! Generic repository trait for entity persistence.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::types::filter::QueryFilter;
use crate::types::pagination::PagedResult;

/// Generic CRUD repository trait.
///
/// Implementations must serialize writes to the same identifier and must
/// compute a search page and its total from one consistent snapshot.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync + 'static {
    /// All entities, ordered by identifier.
    async fn get(&self) -> AppResult<Vec<T>>;

    /// Find an entity by its identifier.
    async fn get_by_id(&self, id: T::Id) -> AppResult<Option<T>>;

    /// Evaluate a filter and return the selected page.
    async fn search(&self, filter: &QueryFilter) -> AppResult<PagedResult<T>>;

    /// Assign an identifier, persist, and return the stored entity.
    async fn add(&self, entity: T) -> AppResult<T>;

    /// Replace the stored state of an existing entity.
    ///
    /// Fails with a not-found error when the identifier does not exist.
    async fn update(&self, entity: T) -> AppResult<T>;

    /// Delete by identifier. Deleting a missing identifier is not an error.
    async fn delete_by_id(&self, id: T::Id) -> AppResult<()>;
}
