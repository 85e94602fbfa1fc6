//! Presentation adapter: view mapping, validation and outcome reporting.

pub mod entity;
pub mod outcome;

pub use entity::EntityAdapter;
pub use outcome::{Outcome, RuleViolation};
