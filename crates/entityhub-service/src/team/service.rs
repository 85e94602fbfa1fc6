//! Team operations.

use std::sync::Arc;

use entityhub_core::traits::Repository;
use entityhub_entity::Team;

use crate::crud::{CrudService, UniqueField};

/// Teams need no behaviour beyond CRUD with a unique name.
pub type TeamService = CrudService<Team>;

impl CrudService<Team> {
    /// Creates the team service.
    pub fn for_teams(repo: Arc<dyn Repository<Team>>) -> Self {
        CrudService::new("TeamService", repo).with_guard(UniqueField::new(
            "TeamService",
            "name",
            "Team name",
        ))
    }
}
