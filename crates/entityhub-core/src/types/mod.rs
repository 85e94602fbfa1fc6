//! Core type definitions used across the EntityHub workspace.

pub mod field;
pub mod filter;
pub mod id;
pub mod pagination;
pub mod validation;

pub use field::{FieldDef, FieldKind, FieldValue};
pub use filter::{FilterValue, QueryFilter};
pub use id::*;
pub use pagination::{PageRequest, PagedResult};
pub use validation::ValidationResult;
