//! # entityhub-core
//!
//! Core crate for EntityHub. Contains the generic entity, repository and
//! service contracts, the query filter and its evaluation engine,
//! validation results, configuration schemas, typed identifiers, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other EntityHub crates.

pub mod config;
pub mod error;
pub mod query;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
