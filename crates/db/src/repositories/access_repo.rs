//! Access predicates gating project-scoped operations.
//!
//! Every predicate returns `Ok(None)` when the project id does not
//! resolve to a live row, so callers can distinguish "entity missing"
//! (not-found) from "access denied" (forbidden). `Some(false)` always
//! means the project exists and the user lacks the relationship.
//!
//! The asymmetry is deliberate and load-bearing: membership grants
//! read access to project-scoped sub-resources, but structural
//! mutations (deleting the project, managing members, creating teams)
//! require ownership.

use sqlx::PgPool;
use taskup_core::types::DbId;

/// Ownership and membership predicates over live projects.
pub struct AccessRepo;

impl AccessRepo {
    /// True iff the live project's owner is `user_id`.
    pub async fn is_owner(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT owner_id FROM projects WHERE id = $1 AND is_deleted = FALSE")
                .bind(project_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(owner_id,)| owner_id == user_id))
    }

    /// True iff a live membership row links `user_id` to the live
    /// project.
    pub async fn is_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        let row: Option<(bool,)> = sqlx::query_as(
            "SELECT EXISTS (\
                 SELECT 1 FROM project_members pm \
                 WHERE pm.project_id = p.id AND pm.user_id = $2 AND pm.is_deleted = FALSE\
             ) \
             FROM projects p WHERE p.id = $1 AND p.is_deleted = FALSE",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(is_member,)| is_member))
    }

    /// Owner or member. The gate for reads and for creating
    /// project-scoped sub-resources (tasks listings, risks, resources,
    /// attachments, chat).
    pub async fn has_access(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        let row: Option<(bool,)> = sqlx::query_as(
            "SELECT p.owner_id = $2 OR EXISTS (\
                 SELECT 1 FROM project_members pm \
                 WHERE pm.project_id = p.id AND pm.user_id = $2 AND pm.is_deleted = FALSE\
             ) \
             FROM projects p WHERE p.id = $1 AND p.is_deleted = FALSE",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(has_access,)| has_access))
    }
}
