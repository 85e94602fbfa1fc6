//! Request and response view-models.

pub mod response;
pub mod team;
pub mod user;

pub use response::{HealthResponse, SearchPage};
pub use team::{TeamEditView, TeamListView, TeamMapper};
pub use user::{UserEditView, UserListView, UserMapper};
