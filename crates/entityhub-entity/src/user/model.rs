//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{ValidateEmail, ValidateLength};

use entityhub_core::traits::{Entity, EntityId};
use entityhub_core::types::{FieldDef, FieldValue, UserId, ValidationResult};

use super::role::UserRole;
use super::status::UserStatus;

/// Longest accepted login.
pub const LOGIN_MAX_LEN: u64 = 64;
/// Shortest accepted login.
pub const LOGIN_MIN_LEN: u64 = 3;
/// Longest accepted display name.
pub const DISPLAY_NAME_MAX_LEN: u64 = 128;

/// A registered user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Surrogate key, `0` until persisted.
    #[sqlx(try_from = "i64")]
    pub id: UserId,
    /// Unique login name.
    pub login: String,
    /// Unique email address.
    pub email: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// User role.
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    /// Account status.
    #[sqlx(try_from = "String")]
    pub status: UserStatus,
}

impl User {
    /// The display name, falling back to the login.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.login)
    }
}

impl Entity for User {
    type Id = UserId;

    const NAME: &'static str = "users";

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::integer("id"),
        FieldDef::text("login"),
        FieldDef::text("email"),
        FieldDef::text("display_name"),
        FieldDef::text("role"),
        FieldDef::text("status"),
    ];

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Integer(self.id.raw())),
            "login" => Some(self.login.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "display_name" => Some(self.display_name.clone().into()),
            "role" => Some(self.role.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::valid();

        if self.login.trim().is_empty() {
            result.push("Login is required");
        } else {
            result.ensure(
                self.login
                    .validate_length(Some(LOGIN_MIN_LEN), Some(LOGIN_MAX_LEN), None),
                format!("Login must be between {LOGIN_MIN_LEN} and {LOGIN_MAX_LEN} characters"),
            );
            result.ensure(
                self.login
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')),
                "Login may only contain letters, digits, '.', '_' and '-'",
            );
        }

        if self.email.trim().is_empty() {
            result.push("Email is required");
        } else {
            result.ensure(self.email.validate_email(), "Email is not a valid address");
        }

        if let Some(display_name) = &self.display_name {
            result.ensure(
                !display_name.trim().is_empty(),
                "Display name cannot be blank",
            );
            result.ensure(
                display_name.validate_length(None, Some(DISPLAY_NAME_MAX_LEN), None),
                format!("Display name must be at most {DISPLAY_NAME_MAX_LEN} characters"),
            );
        }

        result
    }
}
