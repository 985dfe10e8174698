//! Repository for the `tasks` table.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across task queries.
const COLUMNS: &str = "id, project_id, team_id, user_id, created_by, parent_task_id, \
                       title, description, cost, status, priority, deadline, completed, \
                       is_deleted, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task created by `created_by`, returning the row.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, team_id, user_id, created_by, parent_task_id,
                                title, description, cost, status, priority, deadline)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0),
                     COALESCE($9, 'Not Started'), COALESCE($10, 'Medium'), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(input.team_id)
            .bind(input.user_id)
            .bind(created_by)
            .bind(input.parent_task_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.cost)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live tasks of a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// All live tasks assigned to a team.
    pub async fn list_by_team(pool: &PgPool, team_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE team_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// All live tasks assigned directly to a user.
    pub async fn list_assigned_to(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE user_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All live tasks created by a user.
    pub async fn list_created_by(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE created_by = $1 AND is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Live subtasks of a parent task.
    pub async fn list_subtasks(
        pool: &PgPool,
        parent_task_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE parent_task_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(parent_task_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                cost = COALESCE($4, cost),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                deadline = COALESCE($7, deadline),
                completed = COALESCE($8, completed),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.cost)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.deadline)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }
}
