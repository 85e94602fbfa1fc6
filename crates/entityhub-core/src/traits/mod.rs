//! Core traits defined in `entityhub-core` and implemented by other crates.

pub mod entity;
pub mod repository;
pub mod service;

pub use entity::{Entity, EntityId};
pub use repository::Repository;
pub use service::{CreateGuard, EntityService};
