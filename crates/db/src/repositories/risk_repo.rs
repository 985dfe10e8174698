//! Repositories for the `risks`, `risk_analyses`, and
//! `risk_response_plans` tables.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::risk::{
    CreateRisk, CreateRiskAnalysis, CreateRiskResponsePlan, Risk, RiskAnalysis, RiskResponsePlan,
    UpdateRisk, UpdateRiskAnalysis, UpdateRiskResponsePlan,
};

// ---------------------------------------------------------------------------
// RiskRepo
// ---------------------------------------------------------------------------

/// Column list for `risks` queries.
const RISK_COLUMNS: &str = "id, project_id, owner_id, name, description, category, \
                            probability, impact, severity, status, identified_at, \
                            is_deleted, created_at, updated_at";

/// Provides CRUD operations for project risks.
pub struct RiskRepo;

impl RiskRepo {
    /// Insert a new risk owned by `owner_id`, returning the row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateRisk,
    ) -> Result<Risk, sqlx::Error> {
        let query = format!(
            "INSERT INTO risks (project_id, owner_id, name, description, category,
                                probability, impact, severity, status)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 1), $8, COALESCE($9, 'Open'))
             RETURNING {RISK_COLUMNS}"
        );
        sqlx::query_as::<_, Risk>(&query)
            .bind(input.project_id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.probability)
            .bind(input.impact)
            .bind(input.severity)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a risk by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Risk>, sqlx::Error> {
        let query = format!("SELECT {RISK_COLUMNS} FROM risks WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Risk>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a risk by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Risk>, sqlx::Error> {
        let query = format!("SELECT {RISK_COLUMNS} FROM risks WHERE id = $1");
        sqlx::query_as::<_, Risk>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live risks of a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Risk>, sqlx::Error> {
        let query = format!(
            "SELECT {RISK_COLUMNS} FROM risks \
             WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Risk>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a risk. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRisk,
    ) -> Result<Option<Risk>, sqlx::Error> {
        let query = format!(
            "UPDATE risks SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                probability = COALESCE($5, probability),
                impact = COALESCE($6, impact),
                severity = COALESCE($7, severity),
                status = COALESCE($8, status),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {RISK_COLUMNS}"
        );
        sqlx::query_as::<_, Risk>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.probability)
            .bind(input.impact)
            .bind(input.severity)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// RiskAnalysisRepo
// ---------------------------------------------------------------------------

/// Column list for `risk_analyses` queries.
const ANALYSIS_COLUMNS: &str = "id, risk_id, owner_id, analysis_type, matrix_score, \
                                expected_value, is_deleted, created_at, updated_at";

/// Provides CRUD operations for risk analyses.
pub struct RiskAnalysisRepo;

impl RiskAnalysisRepo {
    /// Insert a new analysis owned by `owner_id`, returning the row.
    pub async fn create(
        pool: &PgPool,
        risk_id: DbId,
        owner_id: DbId,
        input: &CreateRiskAnalysis,
    ) -> Result<RiskAnalysis, sqlx::Error> {
        let query = format!(
            "INSERT INTO risk_analyses (risk_id, owner_id, analysis_type, matrix_score, expected_value)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ANALYSIS_COLUMNS}"
        );
        sqlx::query_as::<_, RiskAnalysis>(&query)
            .bind(risk_id)
            .bind(owner_id)
            .bind(&input.analysis_type)
            .bind(&input.matrix_score)
            .bind(input.expected_value)
            .fetch_one(pool)
            .await
    }

    /// Find an analysis by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RiskAnalysis>, sqlx::Error> {
        let query =
            format!("SELECT {ANALYSIS_COLUMNS} FROM risk_analyses WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, RiskAnalysis>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live analyses of a risk.
    pub async fn list_by_risk(
        pool: &PgPool,
        risk_id: DbId,
    ) -> Result<Vec<RiskAnalysis>, sqlx::Error> {
        let query = format!(
            "SELECT {ANALYSIS_COLUMNS} FROM risk_analyses \
             WHERE risk_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, RiskAnalysis>(&query)
            .bind(risk_id)
            .fetch_all(pool)
            .await
    }

    /// Update an analysis. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRiskAnalysis,
    ) -> Result<Option<RiskAnalysis>, sqlx::Error> {
        let query = format!(
            "UPDATE risk_analyses SET
                matrix_score = COALESCE($2, matrix_score),
                expected_value = COALESCE($3, expected_value),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {ANALYSIS_COLUMNS}"
        );
        sqlx::query_as::<_, RiskAnalysis>(&query)
            .bind(id)
            .bind(&input.matrix_score)
            .bind(input.expected_value)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// RiskResponsePlanRepo
// ---------------------------------------------------------------------------

/// Column list for `risk_response_plans` queries.
const PLAN_COLUMNS: &str = "id, risk_id, owner_id, strategy, description, planned_actions, \
                            status, is_deleted, created_at, updated_at";

/// Provides CRUD operations for risk response plans.
pub struct RiskResponsePlanRepo;

impl RiskResponsePlanRepo {
    /// Insert a new response plan owned by `owner_id`, returning the row.
    pub async fn create(
        pool: &PgPool,
        risk_id: DbId,
        owner_id: DbId,
        input: &CreateRiskResponsePlan,
    ) -> Result<RiskResponsePlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO risk_response_plans (risk_id, owner_id, strategy, description,
                                              planned_actions, status)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'Planned'))
             RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, RiskResponsePlan>(&query)
            .bind(risk_id)
            .bind(owner_id)
            .bind(&input.strategy)
            .bind(&input.description)
            .bind(&input.planned_actions)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a response plan by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RiskResponsePlan>, sqlx::Error> {
        let query = format!(
            "SELECT {PLAN_COLUMNS} FROM risk_response_plans WHERE id = $1 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, RiskResponsePlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live response plans of a risk.
    pub async fn list_by_risk(
        pool: &PgPool,
        risk_id: DbId,
    ) -> Result<Vec<RiskResponsePlan>, sqlx::Error> {
        let query = format!(
            "SELECT {PLAN_COLUMNS} FROM risk_response_plans \
             WHERE risk_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, RiskResponsePlan>(&query)
            .bind(risk_id)
            .fetch_all(pool)
            .await
    }

    /// Update a response plan. Only non-`None` fields in `input` are
    /// applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRiskResponsePlan,
    ) -> Result<Option<RiskResponsePlan>, sqlx::Error> {
        let query = format!(
            "UPDATE risk_response_plans SET
                strategy = COALESCE($2, strategy),
                description = COALESCE($3, description),
                planned_actions = COALESCE($4, planned_actions),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, RiskResponsePlan>(&query)
            .bind(id)
            .bind(&input.strategy)
            .bind(&input.description)
            .bind(&input.planned_actions)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }
}
