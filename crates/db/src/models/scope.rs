//! Project scope document model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// A scope row from the `project_scopes` table.
///
/// At most one live scope exists per project. Included/excluded items
/// are newline-separated free text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectScope {
    pub id: DbId,
    pub project_id: DbId,
    pub included_items: Option<String>,
    pub excluded_items: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching a scope to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScope {
    pub included_items: Option<String>,
    pub excluded_items: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// DTO for editing a project's scope. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScope {
    pub included_items: Option<String>,
    pub excluded_items: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}
