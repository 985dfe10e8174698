//! Repository for the `project_scopes` table.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::scope::{CreateScope, ProjectScope, UpdateScope};

/// Column list shared across scope queries.
const COLUMNS: &str = "id, project_id, included_items, excluded_items, start_date, \
                       end_date, is_deleted, created_at, updated_at";

/// Provides CRUD operations for the one-per-project scope document.
pub struct ScopeRepo;

impl ScopeRepo {
    /// Insert a scope for the project, returning it.
    ///
    /// The partial unique index on live scopes rejects a second live
    /// scope for the same project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateScope,
    ) -> Result<ProjectScope, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_scopes (project_id, included_items, excluded_items, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(project_id)
            .bind(&input.included_items)
            .bind(&input.excluded_items)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// The live scope of a project, if one exists.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectScope>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_scopes \
             WHERE project_id = $1 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a project's live scope. Only non-`None` fields in `input`
    /// are applied. Returns `None` if the project has no live scope.
    pub async fn update_by_project(
        pool: &PgPool,
        project_id: DbId,
        input: &UpdateScope,
    ) -> Result<Option<ProjectScope>, sqlx::Error> {
        let query = format!(
            "UPDATE project_scopes SET
                included_items = COALESCE($2, included_items),
                excluded_items = COALESCE($3, excluded_items),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                updated_at = NOW()
             WHERE project_id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectScope>(&query)
            .bind(project_id)
            .bind(&input.included_items)
            .bind(&input.excluded_items)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }
}
