//! The capabilities every persisted domain type must expose.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::types::field::{FieldDef, FieldValue};
use crate::types::validation::ValidationResult;

/// Name of the identifier field in filters and storage.
pub const ID_FIELD: &str = "id";

/// An integer-backed surrogate key.
pub trait EntityId:
    Copy + Eq + Ord + Hash + Debug + Display + Default + Send + Sync + 'static
{
    /// The value carried by an entity that has not been persisted yet.
    const UNSET: Self;

    /// Wrap a raw key.
    fn from_raw(raw: i64) -> Self;

    /// The raw key.
    fn raw(&self) -> i64;

    /// Whether this is [`EntityId::UNSET`].
    fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }
}

/// A domain object with a surrogate key, named fields, and self-validation.
///
/// `Default` yields the blank entity that the write path overlays an edit
/// view onto; its identifier must be [`EntityId::UNSET`].
pub trait Entity: Clone + Default + Debug + Send + Sync + 'static {
    /// Identifier type.
    type Id: EntityId;

    /// Collection name, also used as the storage table name.
    const NAME: &'static str;

    /// Filterable fields, including the identifier.
    const FIELDS: &'static [FieldDef];

    /// The identifier.
    fn id(&self) -> Self::Id;

    /// Overwrite the identifier. Only repositories call this.
    fn set_id(&mut self, id: Self::Id);

    /// Current value of the named field, `None` if the name is not one of
    /// [`Entity::FIELDS`].
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Check structural invariants.
    fn validate(&self) -> ValidationResult;

    /// Look up a field definition by name.
    fn field_def(name: &str) -> Option<&'static FieldDef> {
        Self::FIELDS.iter().find(|d| d.name == name)
    }

    /// Fields written on insert and update: everything but the identifier.
    fn data_fields() -> impl Iterator<Item = &'static FieldDef> {
        Self::FIELDS.iter().filter(|d| d.name != ID_FIELD)
    }
}
