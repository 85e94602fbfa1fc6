//! User-specific handlers.

use std::sync::Arc;

use axum::extract::{Path, State};

use entityhub_service::UserService;

use crate::adapter::Outcome;
use crate::dto::{UserEditView, UserMapper};
use crate::error::ApiResult;
use crate::mapping::ViewMapper;

/// GET /api/users/by-login/{login}
pub async fn get_by_login(
    State(users): State<Arc<UserService>>,
    Path(login): Path<String>,
) -> ApiResult<Outcome<UserEditView>> {
    Ok(match users.get_by_login(&login).await? {
        Some(user) => Outcome::Ok(UserMapper::to_edit(&user)),
        None => Outcome::NotFound,
    })
}
