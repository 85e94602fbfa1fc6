//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use axum::extract::FromRef;

use entityhub_core::config::{AppConfig, QueryConfig};
use entityhub_database::RepositorySet;
use entityhub_entity::{Team, User};
use entityhub_service::{TeamService, UserService};

use crate::adapter::EntityAdapter;
use crate::dto::{TeamMapper, UserMapper};

/// Shared application state, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Backing repositories.
    pub store: RepositorySet,
    /// User service, for lookups beyond plain CRUD.
    pub user_service: Arc<UserService>,
    /// User collection adapter.
    pub users: EntityAdapter<User, UserMapper>,
    /// Team collection adapter.
    pub teams: EntityAdapter<Team, TeamMapper>,
}

impl AppState {
    /// Wire services and adapters over `store`.
    pub fn new(config: AppConfig, store: RepositorySet) -> Self {
        let user_service = Arc::new(UserService::new(Arc::clone(&store.users)));
        let team_service = Arc::new(TeamService::for_teams(Arc::clone(&store.teams)));

        Self {
            config: Arc::new(config),
            users: EntityAdapter::new(user_service.clone()),
            teams: EntityAdapter::new(team_service),
            user_service,
            store,
        }
    }
}

impl FromRef<AppState> for EntityAdapter<User, UserMapper> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for EntityAdapter<Team, TeamMapper> {
    fn from_ref(state: &AppState) -> Self {
        state.teams.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.user_service)
    }
}

impl FromRef<AppState> for QueryConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.query.clone()
    }
}
