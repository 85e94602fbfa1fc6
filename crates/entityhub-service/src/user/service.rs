//! User operations: CRUD with unique login and email.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use entityhub_core::result::AppResult;
use entityhub_core::traits::{EntityService, Repository};
use entityhub_core::types::{PagedResult, QueryFilter, UserId};
use entityhub_entity::User;

use crate::crud::{CrudService, UniqueField};

const COMPONENT: &str = "UserService";

/// Manages user accounts.
///
/// Creating a user fails with a domain-rule error when the login or the
/// email is already in use.
#[derive(Debug)]
pub struct UserService {
    inner: CrudService<User>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repo: Arc<dyn Repository<User>>) -> Self {
        let inner = CrudService::new(COMPONENT, repo)
            .with_guard(UniqueField::new(COMPONENT, "login", "Login"))
            .with_guard(UniqueField::new(COMPONENT, "email", "Email"));
        Self { inner }
    }

    /// Finds a user by exact login.
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let filter = QueryFilter::new().with("login", login).limit(1);
        let found = self.inner.search(&filter).await?.items.into_iter().next();
        debug!(login, found = found.is_some(), "Login lookup");
        Ok(found)
    }
}

#[async_trait]
impl EntityService<User> for UserService {
    async fn get(&self) -> AppResult<Vec<User>> {
        self.inner.get().await
    }

    async fn get_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.inner.get_by_id(id).await
    }

    async fn search(&self, filter: &QueryFilter) -> AppResult<PagedResult<User>> {
        self.inner.search(filter).await
    }

    async fn add(&self, user: User) -> AppResult<User> {
        self.inner.add(user).await
    }

    async fn update(&self, user: User) -> AppResult<User> {
        self.inner.update(user).await
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<()> {
        self.inner.delete_by_id(id).await
    }
}
