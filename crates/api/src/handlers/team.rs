//! Handlers for the `/teams` resource.
//!
//! Creating a team requires project ownership; every other structural
//! change requires being the team's creator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;
use taskup_db::models::task::Task;
use taskup_db::models::team::{AddTeamMember, CreateTeam, Team, TeamMember, UpdateTeam};
use taskup_db::repositories::{CascadeOutcome, LifecycleRepo, TaskRepo, TeamRepo, UserRepo};

use crate::authz::require_owner;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

fn team_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Team", id })
}

fn require_creator(team: &Team, user_id: DbId, action: &str) -> Result<(), AppError> {
    if team.created_by != user_id {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Only the creator of the team can {action}"
        ))));
    }
    Ok(())
}

/// POST /api/v1/teams -- project owner only. The creator is added to
/// the new team as its leader.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    require_owner(&state.pool, input.project_id, user.user_id).await?;

    let team = TeamRepo::create(&state.pool, user.user_id, &input).await?;
    TeamRepo::add_member(
        &state.pool,
        team.id,
        &AddTeamMember {
            user_id: user.user_id,
            role: Some("Leader".to_string()),
            is_leader: Some(true),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /api/v1/teams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Team>> {
    let team = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    Ok(Json(team))
}

/// PUT /api/v1/teams/{id} -- creator only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeam>,
) -> AppResult<Json<Team>> {
    let team = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    require_creator(&team, user.user_id, "update the team")?;

    let updated = TeamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/teams/{id} -- creator only; cascades to the team's
/// memberships and tasks. Repeat deletion is a no-op success.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let team = TeamRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    require_creator(&team, user.user_id, "remove the team")?;

    let outcome = LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::Team, id).await?;
    let message = match outcome {
        CascadeOutcome::Deleted => "Team and all related data soft-deleted successfully",
        CascadeOutcome::AlreadyDeleted => "Team already deleted",
        CascadeOutcome::NotFound => return Err(team_not_found(id)),
    };
    Ok(Json(MessageResponse::new(message)))
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// POST /api/v1/teams/{id}/members -- creator only.
pub async fn add_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddTeamMember>,
) -> AppResult<(StatusCode, Json<TeamMember>)> {
    let team = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    require_creator(&team, user.user_id, "add members")?;

    if !UserRepo::exists_by_id(&state.pool, input.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }));
    }
    if TeamRepo::find_member(&state.pool, id, input.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User is already a team member".into(),
        )));
    }

    let member = TeamRepo::add_member(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// DELETE /api/v1/teams/{id}/members/{user_id} -- creator only.
pub async fn remove_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    let team = TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    require_creator(&team, user.user_id, "remove members")?;

    let removed = LifecycleRepo::remove_team_member(&state.pool, id, member_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Team member",
            id: member_id,
        }));
    }
    Ok(Json(MessageResponse::new("Team member removed successfully")))
}

/// GET /api/v1/teams/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<TeamMember>>> {
    TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    let members = TeamRepo::list_members(&state.pool, id).await?;
    Ok(Json(members))
}

/// GET /api/v1/teams/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    TeamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| team_not_found(id))?;
    let tasks = TaskRepo::list_by_team(&state.pool, id).await?;
    Ok(Json(tasks))
}
