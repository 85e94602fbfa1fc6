//! Entity-agnostic service and reusable domain rules.

pub mod guard;
pub mod service;

pub use guard::UniqueField;
pub use service::CrudService;
