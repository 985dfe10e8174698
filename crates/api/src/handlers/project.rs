//! Handlers for the `/projects` resource: project CRUD, the deletion
//! cascade, and membership management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskup_core::error::CoreError;
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;
use taskup_db::models::project::{CreateProject, Project, ProjectMember, UpdateProject};
use taskup_db::models::task::Task;
use taskup_db::models::team::Team;
use taskup_db::repositories::{
    CascadeOutcome, LifecycleRepo, ProjectRepo, TaskRepo, TeamRepo, UserRepo,
};

use crate::authz::{require_access, require_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Body for adding a member to a project.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: DbId,
    pub role: Option<String>,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects -- everything the caller owns or belongs to.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    require_access(&state.pool, id, user.user_id).await?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id} -- owner only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    require_owner(&state.pool, id, user.user_id).await?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id} -- owner only; cascades to members,
/// teams, team members, tasks, stakeholders, and scope.
///
/// Deleting an already-deleted project is a no-op success; the cascade
/// is not re-run.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    // The ownership check must see already-deleted rows so repeat
    // deletions stay idempotent instead of turning into 404s.
    let project = ProjectRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    if project.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner can delete the project".into(),
        )));
    }

    let outcome = LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::Project, id).await?;
    let message = match outcome {
        CascadeOutcome::Deleted => "Project and all related data soft-deleted successfully",
        CascadeOutcome::AlreadyDeleted => "Project already deleted",
        CascadeOutcome::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }))
        }
    };
    Ok(Json(MessageResponse::new(message)))
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/members -- owner only.
pub async fn add_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<ProjectMember>)> {
    require_owner(&state.pool, id, user.user_id).await?;

    if !UserRepo::exists_by_id(&state.pool, input.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }));
    }
    if ProjectRepo::find_member(&state.pool, id, input.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User is already a project member".into(),
        )));
    }

    let member =
        ProjectRepo::add_member(&state.pool, id, input.user_id, input.role.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// DELETE /api/v1/projects/{id}/members/{user_id} -- owner only.
///
/// Removes the membership, the user's team memberships within the
/// project, and the tasks assigned to them, in one transaction. The
/// teams themselves stay.
pub async fn remove_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    require_owner(&state.pool, id, user.user_id).await?;

    let removed = LifecycleRepo::remove_project_member(&state.pool, id, member_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project member",
            id: member_id,
        }));
    }
    Ok(Json(MessageResponse::new(
        "Project member, their tasks, and any team memberships soft-deleted successfully",
    )))
}

/// GET /api/v1/projects/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectMember>>> {
    require_access(&state.pool, id, user.user_id).await?;
    let members = ProjectRepo::list_members(&state.pool, id).await?;
    Ok(Json(members))
}

// ---------------------------------------------------------------------------
// Project-scoped listings
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/teams
pub async fn list_teams(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Team>>> {
    require_access(&state.pool, id, user.user_id).await?;
    let teams = TeamRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(teams))
}

/// GET /api/v1/projects/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    require_access(&state.pool, id, user.user_id).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(tasks))
}
