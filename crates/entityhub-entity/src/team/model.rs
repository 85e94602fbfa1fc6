//! Team entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::ValidateLength;

use entityhub_core::traits::{Entity, EntityId};
use entityhub_core::types::{FieldDef, FieldValue, TeamId, ValidationResult};

/// Longest accepted team name.
pub const NAME_MAX_LEN: u64 = 80;
/// Longest accepted description.
pub const DESCRIPTION_MAX_LEN: u64 = 500;
/// Largest accepted member cap.
pub const MAX_MEMBERS_LIMIT: i64 = 1000;

/// A named group of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    /// Surrogate key, `0` until persisted.
    #[sqlx(try_from = "i64")]
    pub id: TeamId,
    /// Unique team name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Member cap.
    pub max_members: i64,
    /// Archived teams are read-only.
    pub archived: bool,
}

impl Entity for Team {
    type Id = TeamId;

    const NAME: &'static str = "teams";

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::integer("id"),
        FieldDef::text("name"),
        FieldDef::text("description"),
        FieldDef::integer("max_members"),
        FieldDef::bool("archived"),
    ];

    fn id(&self) -> TeamId {
        self.id
    }

    fn set_id(&mut self, id: TeamId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Integer(self.id.raw())),
            "name" => Some(self.name.as_str().into()),
            "description" => Some(self.description.clone().into()),
            "max_members" => Some(self.max_members.into()),
            "archived" => Some(self.archived.into()),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::valid();

        if self.name.trim().is_empty() {
            result.push("Name is required");
        } else {
            result.ensure(
                self.name.validate_length(None, Some(NAME_MAX_LEN), None),
                format!("Name must be at most {NAME_MAX_LEN} characters"),
            );
        }

        if let Some(description) = &self.description {
            result.ensure(
                description.validate_length(None, Some(DESCRIPTION_MAX_LEN), None),
                format!("Description must be at most {DESCRIPTION_MAX_LEN} characters"),
            );
        }

        result.ensure(
            (1..=MAX_MEMBERS_LIMIT).contains(&self.max_members),
            format!("Max members must be between 1 and {MAX_MEMBERS_LIMIT}"),
        );

        result
    }
}
