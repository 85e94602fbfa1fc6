//! Conversions between entities and their wire-facing views.

use serde::Serialize;
use serde::de::DeserializeOwned;

use entityhub_core::traits::Entity;

/// Maps an entity to its list and edit views, and edit views back onto
/// entities.
///
/// Implementors are marker types; all conversions are associated
/// functions.
pub trait ViewMapper<T: Entity>: Send + Sync + 'static {
    /// Read-only summary shown in collections.
    type List: Serialize + Send + 'static;
    /// Writable view. Every writable field is optional.
    type Edit: Serialize + DeserializeOwned + Send + 'static;

    /// Summarize an entity.
    fn to_list(entity: &T) -> Self::List;

    /// Render every field of an entity, identifier included.
    fn to_edit(entity: &T) -> Self::Edit;

    /// Copy each present field of `edit` onto `entity`.
    ///
    /// Absent fields leave the entity untouched, and the identifier is
    /// never written.
    fn overlay(edit: &Self::Edit, entity: &mut T);

    /// A fresh, unpersisted entity built from an edit view.
    fn to_new(edit: &Self::Edit) -> T {
        let mut entity = T::default();
        Self::overlay(edit, &mut entity);
        entity
    }

    /// Summarize a slice of entities, preserving order.
    fn to_list_all(entities: &[T]) -> Vec<Self::List> {
        entities.iter().map(Self::to_list).collect()
    }
}
