//! Repository for the `teams` and `team_members` tables.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::team::{AddTeamMember, CreateTeam, Team, TeamMember, UpdateTeam};

/// Column list shared across team queries.
const COLUMNS: &str = "id, project_id, created_by, name, description, color_index, \
                       is_deleted, created_at, updated_at";

/// Column list for team membership queries.
const MEMBER_COLUMNS: &str =
    "id, team_id, user_id, role, is_leader, is_active, created_at, updated_at";

/// Provides CRUD operations for teams and their membership rows.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team created by `created_by`, returning the row.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateTeam,
    ) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (project_id, created_by, name, description, color_index)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(input.project_id)
            .bind(created_by)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.color_index)
            .fetch_one(pool)
            .await
    }

    /// Find a team by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live teams of a project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teams \
             WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// All live teams a user belongs to, through live membership rows.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Team>, sqlx::Error> {
        let query = "SELECT t.id, t.project_id, t.created_by, t.name, t.description, \
                     t.color_index, t.is_deleted, t.created_at, t.updated_at \
                     FROM teams t \
                     JOIN team_members tm ON tm.team_id = t.id \
                     WHERE tm.user_id = $1 AND tm.is_active = TRUE AND t.is_deleted = FALSE \
                     ORDER BY t.created_at";
        sqlx::query_as::<_, Team>(query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a team. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                color_index = COALESCE($4, color_index),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.color_index)
            .fetch_optional(pool)
            .await
    }

    // ── Membership ────────────────────────────────────────────────────

    /// Insert a membership row for the team.
    ///
    /// The partial unique index on active memberships rejects
    /// duplicates; callers pre-check with [`TeamRepo::find_member`].
    pub async fn add_member(
        pool: &PgPool,
        team_id: DbId,
        input: &AddTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (team_id, user_id, role, is_leader)
             VALUES ($1, $2, COALESCE($3, 'Member'), COALESCE($4, FALSE))
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(input.user_id)
            .bind(&input.role)
            .bind(input.is_leader)
            .fetch_one(pool)
            .await
    }

    /// Find the active membership row for a `(team, user)` pair.
    pub async fn find_member(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members \
             WHERE team_id = $1 AND user_id = $2 AND is_active = TRUE"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All active membership rows of a team.
    pub async fn list_members(
        pool: &PgPool,
        team_id: DbId,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members \
             WHERE team_id = $1 AND is_active = TRUE ORDER BY created_at"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }
}
