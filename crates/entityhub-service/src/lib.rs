//! # entityhub-service
//!
//! Business logic service layer for EntityHub. [`CrudService`] wraps any
//! repository and runs registered create guards before persisting; the
//! per-entity services configure it with their domain rules.
//!
//! Services follow constructor injection: the repository is provided at
//! construction time as an `Arc<dyn Repository<T>>`.

pub mod crud;
pub mod team;
pub mod user;

pub use crud::{CrudService, UniqueField};
pub use team::TeamService;
pub use user::UserService;
