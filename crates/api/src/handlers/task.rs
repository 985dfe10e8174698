//! Handlers for the `/tasks` resource.
//!
//! Task creation is restricted to the project owner; updates and
//! deletion to the task's creator. Assignment is exclusive (team or
//! user) and an assigned user must be a member of the project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;
use taskup_core::validation::validate_task_assignment;
use taskup_db::models::task::{CreateTask, Task, UpdateTask};
use taskup_db::repositories::{
    AccessRepo, CascadeOutcome, LifecycleRepo, ProjectRepo, TaskRepo, TeamRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

/// POST /api/v1/tasks -- project owner only.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let project = ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;
    if project.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner can create tasks".into(),
        )));
    }

    validate_task_assignment(input.team_id, input.user_id).map_err(AppError::Core)?;

    if let Some(team_id) = input.team_id {
        TeamRepo::find_by_id(&state.pool, team_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Team",
                id: team_id,
            }))?;
    } else if let Some(assignee_id) = input.user_id {
        if assignee_id == user.user_id {
            return Err(AppError::BadRequest(
                "You cannot assign a task to yourself".into(),
            ));
        }
        if !UserRepo::exists_by_id(&state.pool, assignee_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: assignee_id,
            }));
        }
        let is_member = AccessRepo::is_member(&state.pool, input.project_id, assignee_id)
            .await?
            .unwrap_or(false);
        if !is_member {
            return Err(AppError::Core(CoreError::Forbidden(
                "Assigned user is not a member of the project".into(),
            )));
        }
    }

    let task = TaskRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(task))
}

/// GET /api/v1/tasks/{id}/subtasks
pub async fn list_subtasks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    let subtasks = TaskRepo::list_subtasks(&state.pool, id).await?;
    Ok(Json(subtasks))
}

/// PUT /api/v1/tasks/{id} -- creator only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    if task.created_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the task creator can update this task".into(),
        )));
    }

    let updated = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/tasks/{id} -- creator only; subtasks follow. Repeat
/// deletion is a no-op success.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let task = TaskRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    if task.created_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the task creator can delete this task".into(),
        )));
    }

    let outcome = LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::Task, id).await?;
    let message = match outcome {
        CascadeOutcome::Deleted => "Task deleted successfully",
        CascadeOutcome::AlreadyDeleted => "Task already deleted",
        CascadeOutcome::NotFound => return Err(task_not_found(id)),
    };
    Ok(Json(MessageResponse::new(message)))
}
