//! Repository for the `projects` and `project_members` tables.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectMember, UpdateProject};

/// Column list shared across project queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, deadline, progress, \
                       total_budget, remaining_budget, is_deleted, created_at, updated_at";

/// Column list for membership queries.
const MEMBER_COLUMNS: &str = "id, project_id, user_id, role, is_deleted, created_at, updated_at";

/// Provides CRUD operations for projects and their membership rows.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created
    /// row. The remaining budget starts equal to the total budget.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, name, description, deadline, total_budget, remaining_budget)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(input.total_budget)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID, including soft-deleted rows. Used to tell
    /// "already deleted" apart from "never existed".
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live projects a user can see: owned by them or where a live
    /// membership row links them in. Most recent first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE is_deleted = FALSE AND (owner_id = $1 OR id IN (\
                 SELECT project_id FROM project_members \
                 WHERE user_id = $1 AND is_deleted = FALSE\
             )) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                deadline = COALESCE($4, deadline),
                progress = COALESCE($5, progress),
                total_budget = COALESCE($6, total_budget),
                remaining_budget = COALESCE($7, remaining_budget),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(input.progress)
            .bind(input.total_budget)
            .bind(input.remaining_budget)
            .fetch_optional(pool)
            .await
    }

    // ── Membership ────────────────────────────────────────────────────

    /// Insert a membership row for `(project_id, user_id)`.
    ///
    /// The partial unique index on live memberships rejects duplicates;
    /// callers pre-check with [`ProjectRepo::find_member`] for a clean
    /// conflict message and rely on the constraint as backstop.
    pub async fn add_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        role: Option<&str>,
    ) -> Result<ProjectMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_members (project_id, user_id, role)
             VALUES ($1, $2, COALESCE($3, 'Member'))
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find the live membership row for a `(project, user)` pair.
    pub async fn find_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM project_members \
             WHERE project_id = $1 AND user_id = $2 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All live membership rows of a project.
    pub async fn list_members(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM project_members \
             WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
