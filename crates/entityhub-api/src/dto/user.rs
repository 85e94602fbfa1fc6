//! User view-models.

use serde::{Deserialize, Serialize};

use entityhub_core::types::UserId;
use entityhub_entity::{User, UserRole, UserStatus};

use crate::mapping::ViewMapper;

/// User summary for collection responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListView {
    /// User ID.
    pub id: UserId,
    /// Login.
    pub login: String,
    /// Display name, or the login when none is set.
    pub name: String,
    /// Role.
    pub role: UserRole,
}

/// Writable user view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserEditView {
    /// Set on responses; ignored on writes.
    pub id: Option<UserId>,
    /// Login.
    pub login: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Role.
    pub role: Option<UserRole>,
    /// Status.
    pub status: Option<UserStatus>,
}

/// Maps [`User`] to and from its views.
#[derive(Debug, Clone, Copy)]
pub struct UserMapper;

impl ViewMapper<User> for UserMapper {
    type List = UserListView;
    type Edit = UserEditView;

    fn to_list(user: &User) -> UserListView {
        UserListView {
            id: user.id,
            login: user.login.clone(),
            name: user.name().to_string(),
            role: user.role,
        }
    }

    fn to_edit(user: &User) -> UserEditView {
        UserEditView {
            id: Some(user.id),
            login: Some(user.login.clone()),
            email: Some(user.email.clone()),
            display_name: user.display_name.clone(),
            role: Some(user.role),
            status: Some(user.status),
        }
    }

    fn overlay(edit: &UserEditView, user: &mut User) {
        if let Some(login) = &edit.login {
            user.login = login.clone();
        }
        if let Some(email) = &edit.email {
            user.email = email.clone();
        }
        if let Some(display_name) = &edit.display_name {
            user.display_name = Some(display_name.clone());
        }
        if let Some(role) = edit.role {
            user.role = role;
        }
        if let Some(status) = edit.status {
            user.status = status;
        }
    }
}
