//! Project stakeholder model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// A stakeholder row from the `stakeholders` table.
///
/// `percentage` is the user's share in the project, bounded to
/// [0, 100] per row. Shares across a project are not required to sum
/// to anything.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stakeholder {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: Option<String>,
    pub percentage: f64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a stakeholder to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStakeholder {
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: Option<String>,
    pub percentage: f64,
}

/// DTO for updating a stakeholder. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStakeholder {
    pub role: Option<String>,
    pub percentage: Option<f64>,
}
