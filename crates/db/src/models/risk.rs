//! Risk, risk analysis, and risk response plan models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// A risk row from the `risks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Risk {
    pub id: DbId,
    pub project_id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub probability: f64,
    pub impact: i32,
    pub severity: f64,
    pub status: String,
    pub identified_at: Timestamp,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new risk on a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRisk {
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub probability: f64,
    pub impact: Option<i32>,
    pub severity: f64,
    /// Defaults to "Open".
    pub status: Option<String>,
}

/// DTO for updating a risk. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRisk {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub probability: Option<f64>,
    pub impact: Option<i32>,
    pub severity: Option<f64>,
    pub status: Option<String>,
}

/// A risk analysis row from the `risk_analyses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskAnalysis {
    pub id: DbId,
    pub risk_id: DbId,
    pub owner_id: DbId,
    pub analysis_type: String,
    pub matrix_score: String,
    pub expected_value: f64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an analysis of a risk. The risk id comes from the
/// route.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRiskAnalysis {
    pub analysis_type: String,
    pub matrix_score: String,
    pub expected_value: f64,
}

/// DTO for updating a risk analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRiskAnalysis {
    pub matrix_score: Option<String>,
    pub expected_value: Option<f64>,
}

/// A response plan row from the `risk_response_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskResponsePlan {
    pub id: DbId,
    pub risk_id: DbId,
    pub owner_id: DbId,
    pub strategy: String,
    pub description: Option<String>,
    pub planned_actions: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a response plan for a risk. The risk id comes
/// from the route.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRiskResponsePlan {
    pub strategy: String,
    pub description: Option<String>,
    pub planned_actions: String,
    /// Defaults to "Planned".
    pub status: Option<String>,
}

/// DTO for updating a response plan.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRiskResponsePlan {
    pub strategy: Option<String>,
    pub description: Option<String>,
    pub planned_actions: Option<String>,
    pub status: Option<String>,
}
