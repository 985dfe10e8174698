//! Soft-delete flag store and table-driven cascade resolver.
//!
//! All deactivation in the system funnels through this repository. The
//! entity graph registry (`taskup_core::graph`) supplies table names,
//! flag columns with their polarity, and parent-to-child edges, so the
//! cascade walker here has no per-entity branches: adding a dependent
//! entity to a cascade means adding a registry entry, not code here.
//!
//! Each cascade runs inside a single transaction; a failure at any step
//! rolls the whole cascade back, so concurrent readers never observe a
//! partially deactivated tree.

use std::future::Future;
use std::pin::Pin;

use sqlx::{PgConnection, PgPool};
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;

/// Result of asking for a root entity's tree to be deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// The root was live; the root and every live dependent are now
    /// inactive.
    Deleted,
    /// The root was already inactive. The cascade did not run again.
    AlreadyDeleted,
    /// No row with this id exists at all.
    NotFound,
}

fn bool_sql(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Soft-delete flag operations and cascades over the entity graph.
pub struct LifecycleRepo;

impl LifecycleRepo {
    /// Whether the row is currently live, or `None` if the id does not
    /// resolve to any row.
    pub async fn is_live(
        pool: &PgPool,
        kind: EntityKind,
        id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        let flag = kind.flag();
        let sql = format!("SELECT {} FROM {} WHERE id = $1", flag.column, kind.table());
        let row: Option<(bool,)> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|(value,)| value == flag.live_value()))
    }

    /// Flip a single row to its inactive value.
    ///
    /// Idempotent: `Ok(Some(true))` when the row was live and flipped,
    /// `Ok(Some(false))` when it was already inactive (not an error),
    /// `Ok(None)` when no row with this id exists.
    pub async fn mark_inactive(
        pool: &PgPool,
        kind: EntityKind,
        id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        let flag = kind.flag();
        let sql = format!(
            "UPDATE {} SET {} = {}, updated_at = NOW() WHERE id = $1 AND {}",
            kind.table(),
            flag.column,
            bool_sql(flag.dead_value()),
            flag.live_sql()
        );
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        if result.rows_affected() > 0 {
            return Ok(Some(true));
        }

        let exists_sql = format!("SELECT 1 FROM {} WHERE id = $1", kind.table());
        let exists: Option<(i32,)> = sqlx::query_as(&exists_sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(exists.map(|_| false))
    }

    /// Deactivate a root entity and, transitively, every live dependent
    /// registered in the entity graph. One transaction; all or nothing.
    ///
    /// Re-deleting an already-inactive root is a no-op success
    /// ([`CascadeOutcome::AlreadyDeleted`]); the cascade is not re-run.
    pub async fn soft_delete_tree(
        pool: &PgPool,
        kind: EntityKind,
        id: DbId,
    ) -> Result<CascadeOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let flag = kind.flag();

        // Lock the root row so concurrent cascades on the same tree
        // serialize here.
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 FOR UPDATE",
            flag.column,
            kind.table()
        );
        let row: Option<(bool,)> = sqlx::query_as(&sql).bind(id).fetch_optional(&mut *tx).await?;
        match row {
            None => return Ok(CascadeOutcome::NotFound),
            Some((value,)) if value == flag.dead_value() => {
                return Ok(CascadeOutcome::AlreadyDeleted)
            }
            Some(_) => {}
        }

        let sql = format!(
            "UPDATE {} SET {} = {}, updated_at = NOW() WHERE id = $1",
            kind.table(),
            flag.column,
            bool_sql(flag.dead_value())
        );
        sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        cascade_children(&mut *tx, kind, vec![id]).await?;

        tx.commit().await?;
        tracing::debug!(kind = ?kind, %id, "soft-deleted entity tree");
        Ok(CascadeOutcome::Deleted)
    }

    /// Remove a user's membership in a project, together with their
    /// team memberships across the project's live teams and the tasks
    /// assigned to them within the project. One transaction.
    ///
    /// Returns `Ok(false)` when no live membership row exists for the
    /// pair (callers surface that as not-found).
    pub async fn remove_project_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE project_members SET is_deleted = TRUE, updated_at = NOW() \
             WHERE project_id = $1 AND user_id = $2 AND is_deleted = FALSE",
        )
        .bind(project_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        // Collect the project's live team ids before touching their
        // membership rows.
        let team_ids: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM teams WHERE project_id = $1 AND is_deleted = FALSE")
                .bind(project_id)
                .fetch_all(&mut *tx)
                .await?;
        let team_ids: Vec<DbId> = team_ids.into_iter().map(|(id,)| id).collect();

        if !team_ids.is_empty() {
            sqlx::query(
                "UPDATE team_members SET is_active = FALSE, updated_at = NOW() \
                 WHERE team_id = ANY($1) AND user_id = $2 AND is_active = TRUE",
            )
            .bind(&team_ids)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE tasks SET is_deleted = TRUE, updated_at = NOW() \
             WHERE project_id = $1 AND user_id = $2 AND is_deleted = FALSE",
        )
        .bind(project_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(%project_id, %user_id, "removed project member");
        Ok(true)
    }

    /// Deactivate a user's membership in a single team.
    ///
    /// Returns `Ok(false)` when no live membership row exists. The
    /// team's tasks are untouched: team-assigned tasks carry no user
    /// assignment (assignment is exclusive), so there is nothing of the
    /// departing member's to deactivate.
    pub async fn remove_team_member(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE team_members SET is_active = FALSE, updated_at = NOW() \
             WHERE team_id = $1 AND user_id = $2 AND is_active = TRUE",
        )
        .bind(team_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Walk the registry depth-first from `kind`, deactivating live child
/// rows level by level.
///
/// Child ids are collected before their rows are marked so the level
/// below can still be found through them. Self-referencing edges (task
/// subtasks) terminate naturally: already-marked rows are no longer
/// live, so the collected id set shrinks to empty.
fn cascade_children<'a>(
    conn: &'a mut PgConnection,
    kind: EntityKind,
    ids: Vec<DbId>,
) -> Pin<Box<dyn Future<Output = Result<(), sqlx::Error>> + Send + 'a>> {
    Box::pin(async move {
        if ids.is_empty() {
            return Ok(());
        }
        for rel in kind.children() {
            let child = rel.child;
            let flag = child.flag();

            let select = format!(
                "SELECT id FROM {} WHERE {} = ANY($1) AND {}",
                child.table(),
                rel.foreign_key,
                flag.live_sql()
            );
            let rows: Vec<(DbId,)> = sqlx::query_as(&select)
                .bind(&ids)
                .fetch_all(&mut *conn)
                .await?;
            if rows.is_empty() {
                continue;
            }
            let child_ids: Vec<DbId> = rows.into_iter().map(|(id,)| id).collect();

            let update = format!(
                "UPDATE {} SET {} = {}, updated_at = NOW() WHERE id = ANY($1)",
                child.table(),
                flag.column,
                bool_sql(flag.dead_value())
            );
            sqlx::query(&update)
                .bind(&child_ids)
                .execute(&mut *conn)
                .await?;

            cascade_children(conn, child, child_ids).await?;
        }
        Ok(())
    })
}
