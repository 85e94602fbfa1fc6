//! # entityhub-entity
//!
//! Domain entity models for EntityHub. Every struct in this crate
//! implements [`entityhub_core::traits::Entity`], derives `Debug`, `Clone`,
//! `Default`, `Serialize` and `Deserialize`, and additionally derives
//! `sqlx::FromRow` so the PostgreSQL repository can decode it.

pub mod team;
pub mod user;

pub use team::Team;
pub use user::{User, UserRole, UserStatus};
