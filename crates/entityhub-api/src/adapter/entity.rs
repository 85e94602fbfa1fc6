//! Generic presentation adapter for one entity collection.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use entityhub_core::result::AppResult;
use entityhub_core::traits::{Entity, EntityService};
use entityhub_core::types::QueryFilter;

use crate::adapter::outcome::{Outcome, RuleViolation};
use crate::dto::SearchPage;
use crate::mapping::ViewMapper;

/// Runs the write path (map, validate, persist) and the read path (fetch,
/// map) for one entity type.
///
/// Expected failures (missing entity, invalid input, refused by a domain
/// rule) come back as an [`Outcome`]. Only faults are returned as `Err`.
pub struct EntityAdapter<T: Entity, M> {
    service: Arc<dyn EntityService<T>>,
    _mapper: PhantomData<fn() -> M>,
}

impl<T: Entity, M> Clone for EntityAdapter<T, M> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            _mapper: PhantomData,
        }
    }
}

impl<T: Entity, M> fmt::Debug for EntityAdapter<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityAdapter")
            .field("entity", &T::NAME)
            .finish_non_exhaustive()
    }
}

impl<T: Entity, M: ViewMapper<T>> EntityAdapter<T, M> {
    /// Creates an adapter over `service`.
    pub fn new(service: Arc<dyn EntityService<T>>) -> Self {
        Self {
            service,
            _mapper: PhantomData,
        }
    }

    /// Every entity as a list view.
    pub async fn get(&self) -> AppResult<Outcome<Vec<M::List>>> {
        let entities = self.service.get().await?;
        Ok(Outcome::Ok(M::to_list_all(&entities)))
    }

    /// One entity as an edit view.
    pub async fn get_by_id(&self, id: T::Id) -> AppResult<Outcome<M::Edit>> {
        Ok(match self.service.get_by_id(id).await? {
            Some(entity) => Outcome::Ok(M::to_edit(&entity)),
            None => Outcome::NotFound,
        })
    }

    /// A filtered page of list views plus the total match count.
    pub async fn search(&self, filter: &QueryFilter) -> AppResult<Outcome<SearchPage<M::List>>> {
        let page = self.service.search(filter).await?;
        Ok(Outcome::Ok(SearchPage {
            result: M::to_list_all(&page.items),
            count: page.total,
        }))
    }

    /// Create an entity from an edit view.
    ///
    /// An entity that fails validation never reaches the service.
    pub async fn add(&self, edit: M::Edit) -> AppResult<Outcome<M::Edit>> {
        let entity = M::to_new(&edit);
        let validation = entity.validate();
        if !validation.is_valid() {
            debug!(entity = T::NAME, errors = validation.errors().len(), "Create rejected by validation");
            return Ok(Outcome::Invalid(validation.into_errors()));
        }

        match self.service.add(entity).await {
            Ok(stored) => Ok(Outcome::Created(M::to_edit(&stored))),
            Err(err) if err.is_domain_rule() => Ok(Outcome::Rejected(RuleViolation::from(err))),
            Err(err) => Err(err),
        }
    }

    /// Overlay an edit view onto an existing entity and store the result.
    pub async fn put(&self, id: T::Id, edit: M::Edit) -> AppResult<Outcome<M::Edit>> {
        let Some(mut entity) = self.service.get_by_id(id).await? else {
            return Ok(Outcome::NotFound);
        };

        M::overlay(&edit, &mut entity);
        let validation = entity.validate();
        if !validation.is_valid() {
            debug!(entity = T::NAME, %id, errors = validation.errors().len(), "Update rejected by validation");
            return Ok(Outcome::Invalid(validation.into_errors()));
        }

        match self.service.update(entity).await {
            Ok(stored) => Ok(Outcome::Ok(M::to_edit(&stored))),
            // Deleted between the fetch and the write.
            Err(err) if err.is_not_found() => Ok(Outcome::NotFound),
            Err(err) if err.is_domain_rule() => Ok(Outcome::Rejected(RuleViolation::from(err))),
            Err(err) => Err(err),
        }
    }

    /// Delete an existing entity.
    pub async fn delete(&self, id: T::Id) -> AppResult<Outcome<()>> {
        if self.service.get_by_id(id).await?.is_none() {
            return Ok(Outcome::NotFound);
        }
        self.service.delete_by_id(id).await?;
        Ok(Outcome::NoContent)
    }
}
