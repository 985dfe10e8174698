//! Team and team-membership models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// A team row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub project_id: DbId,
    pub created_by: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color_index: i32,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new team within a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color_index: Option<i32>,
}

/// DTO for updating a team. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color_index: Option<i32>,
}

/// A membership row from the `team_members` table.
///
/// Note the flag convention: this table marks removal with
/// `is_active = false`, unlike the `is_deleted` convention elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub team_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub is_leader: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a member to a team.
#[derive(Debug, Clone, Deserialize)]
pub struct AddTeamMember {
    pub user_id: DbId,
    pub role: Option<String>,
    pub is_leader: Option<bool>,
}
