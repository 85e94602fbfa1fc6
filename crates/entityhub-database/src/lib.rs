//! # entityhub-database
//!
//! Backing stores for EntityHub: a process-local store used for
//! development and tests, and a PostgreSQL store built on sqlx. Both
//! implement the generic [`Repository`] contract and share the query
//! engine from `entityhub-core`, so filtering and paging behave the same
//! on either backend.
//!
//! [`Repository`]: entityhub_core::traits::Repository

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryRepository, PgRepository};
pub use store::RepositorySet;
