//! Repository for the `stakeholders` table.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::stakeholder::{CreateStakeholder, Stakeholder, UpdateStakeholder};

/// Column list shared across stakeholder queries.
const COLUMNS: &str =
    "id, project_id, user_id, role, percentage, is_deleted, created_at, updated_at";

/// Provides CRUD operations for project stakeholders.
///
/// Percentage bounds are validated by callers before any call here;
/// the database CHECK constraint is the backstop.
pub struct StakeholderRepo;

impl StakeholderRepo {
    /// Insert a new stakeholder row, returning it.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStakeholder,
    ) -> Result<Stakeholder, sqlx::Error> {
        let query = format!(
            "INSERT INTO stakeholders (project_id, user_id, role, percentage)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stakeholder>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.role)
            .bind(input.percentage)
            .fetch_one(pool)
            .await
    }

    /// Find a stakeholder by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stakeholder>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM stakeholders WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Stakeholder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a stakeholder by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Stakeholder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stakeholders WHERE id = $1");
        sqlx::query_as::<_, Stakeholder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live stakeholders of a project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Stakeholder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stakeholders \
             WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, Stakeholder>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find the live stakeholder row for a `(project, user)` pair.
    pub async fn find_by_project_and_user(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Stakeholder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stakeholders \
             WHERE project_id = $1 AND user_id = $2 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, Stakeholder>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a stakeholder. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no live row exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStakeholder,
    ) -> Result<Option<Stakeholder>, sqlx::Error> {
        let query = format!(
            "UPDATE stakeholders SET
                role = COALESCE($2, role),
                percentage = COALESCE($3, percentage),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stakeholder>(&query)
            .bind(id)
            .bind(&input.role)
            .bind(input.percentage)
            .fetch_optional(pool)
            .await
    }
}
