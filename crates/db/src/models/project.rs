//! Project and project-membership models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<Timestamp>,
    pub progress: i32,
    pub total_budget: f64,
    pub remaining_budget: f64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<Timestamp>,
    /// Defaults to 0 if omitted. `remaining_budget` starts equal to it.
    pub total_budget: Option<f64>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Timestamp>,
    pub progress: Option<i32>,
    pub total_budget: Option<f64>,
    pub remaining_budget: Option<f64>,
}

/// A membership row from the `project_members` table.
///
/// Represents a user's participation in a project, distinct from
/// ownership.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
