//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// Predefined task statuses.
pub mod status {
    pub const NOT_STARTED: &str = "Not Started";
    pub const IN_PROGRESS: &str = "In Progress";
    pub const COMPLETED: &str = "Completed";
}

/// Predefined task priorities.
pub mod priority {
    pub const LOW: &str = "Low";
    pub const MEDIUM: &str = "Medium";
    pub const HIGH: &str = "High";
}

/// A task row from the `tasks` table.
///
/// Assignment is exclusive: `team_id` and `user_id` are never both set.
/// `parent_task_id` links a subtask to its parent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub team_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub created_by: DbId,
    pub parent_task_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub cost: f64,
    pub status: String,
    pub priority: String,
    pub deadline: Option<Timestamp>,
    pub completed: bool,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub team_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub parent_task_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub cost: Option<f64>,
    /// Defaults to "Not Started".
    pub status: Option<String>,
    /// Defaults to "Medium".
    pub priority: Option<String>,
    pub deadline: Option<Timestamp>,
}

/// DTO for updating a task. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<Timestamp>,
    pub completed: Option<bool>,
}
