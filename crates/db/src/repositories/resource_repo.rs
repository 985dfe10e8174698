//! Repositories for the `resources` and `activity_resources` tables.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::resource::{
    ActivityResource, CreateActivityResource, CreateResource, Resource, UpdateResource,
};

// ---------------------------------------------------------------------------
// ResourceRepo
// ---------------------------------------------------------------------------

/// Column list for `resources` queries.
const RESOURCE_COLUMNS: &str = "id, project_id, name, kind, description, unit, total, \
                                available, is_deleted, created_at, updated_at";

/// Provides CRUD operations for project resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Insert a new resource, returning the row.
    pub async fn create(pool: &PgPool, input: &CreateResource) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (project_id, name, kind, description, unit, total, available)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 0))
             RETURNING {RESOURCE_COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.description)
            .bind(&input.unit)
            .bind(input.total)
            .bind(input.available)
            .fetch_one(pool)
            .await
    }

    /// Find a resource by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        let query =
            format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a resource by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live resources of a project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources \
             WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a resource. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResource,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources SET
                name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                description = COALESCE($4, description),
                unit = COALESCE($5, unit),
                total = COALESCE($6, total),
                available = COALESCE($7, available),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {RESOURCE_COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.description)
            .bind(&input.unit)
            .bind(input.total)
            .bind(input.available)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// ActivityResourceRepo
// ---------------------------------------------------------------------------

/// Column list for `activity_resources` queries.
const ACTIVITY_COLUMNS: &str = "id, task_id, resource_id, quantity, estimated_cost, \
                                is_deleted, created_at, updated_at";

/// Provides CRUD operations for resource-to-task assignments.
pub struct ActivityResourceRepo;

impl ActivityResourceRepo {
    /// Insert a new assignment, returning the row.
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        input: &CreateActivityResource,
    ) -> Result<ActivityResource, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_resources (task_id, resource_id, quantity, estimated_cost)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, ActivityResource>(&query)
            .bind(task_id)
            .bind(input.resource_id)
            .bind(input.quantity)
            .bind(input.estimated_cost)
            .fetch_one(pool)
            .await
    }

    /// Find an assignment by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ActivityResource>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activity_resources WHERE id = $1 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, ActivityResource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live assignments of a task.
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<ActivityResource>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activity_resources \
             WHERE task_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, ActivityResource>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

}
