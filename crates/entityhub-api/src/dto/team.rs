//! Team view-models.

use serde::{Deserialize, Serialize};

use entityhub_core::types::TeamId;
use entityhub_entity::Team;

use crate::mapping::ViewMapper;

/// Team summary for collection responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamListView {
    /// Team ID.
    pub id: TeamId,
    /// Team name.
    pub name: String,
    /// Whether the team is archived.
    pub archived: bool,
}

/// Writable team view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamEditView {
    /// Set on responses; ignored on writes.
    pub id: Option<TeamId>,
    /// Team name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Member cap.
    pub max_members: Option<i64>,
    /// Archived flag.
    pub archived: Option<bool>,
}

/// Maps [`Team`] to and from its views.
#[derive(Debug, Clone, Copy)]
pub struct TeamMapper;

impl ViewMapper<Team> for TeamMapper {
    type List = TeamListView;
    type Edit = TeamEditView;

    fn to_list(team: &Team) -> TeamListView {
        TeamListView {
            id: team.id,
            name: team.name.clone(),
            archived: team.archived,
        }
    }

    fn to_edit(team: &Team) -> TeamEditView {
        TeamEditView {
            id: Some(team.id),
            name: Some(team.name.clone()),
            description: team.description.clone(),
            max_members: Some(team.max_members),
            archived: Some(team.archived),
        }
    }

    fn overlay(edit: &TeamEditView, team: &mut Team) {
        if let Some(name) = &edit.name {
            team.name = name.clone();
        }
        if let Some(description) = &edit.description {
            team.description = Some(description.clone());
        }
        if let Some(max_members) = edit.max_members {
            team.max_members = max_members;
        }
        if let Some(archived) = edit.archived {
            team.archived = archived;
        }
    }
}
