//! Resource and activity-resource models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// A resource row from the `resources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub total: f64,
    pub available: f64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a resource on a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResource {
    pub project_id: DbId,
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub total: Option<f64>,
    pub available: Option<f64>,
}

/// DTO for updating a resource. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResource {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub total: Option<f64>,
    pub available: Option<f64>,
}

/// An assignment row from the `activity_resources` table, tying a
/// quantity of a resource to a task.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityResource {
    pub id: DbId,
    pub task_id: DbId,
    pub resource_id: DbId,
    pub quantity: f64,
    pub estimated_cost: f64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning a resource to a task. The task id comes from the
/// route.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityResource {
    pub resource_id: DbId,
    pub quantity: f64,
    pub estimated_cost: Option<f64>,
}
