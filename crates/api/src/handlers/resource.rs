//! Handlers for project resources and their task assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;
use taskup_db::models::resource::{
    ActivityResource, CreateActivityResource, CreateResource, Resource, UpdateResource,
};
use taskup_db::repositories::{
    ActivityResourceRepo, CascadeOutcome, LifecycleRepo, ResourceRepo, TaskRepo,
};

use crate::authz::require_access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

fn resource_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Resource",
        id,
    })
}

/// POST /api/v1/resources
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateResource>,
) -> AppResult<(StatusCode, Json<Resource>)> {
    require_access(&state.pool, input.project_id, user.user_id).await?;
    let resource = ResourceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// GET /api/v1/projects/{id}/resources
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Resource>>> {
    require_access(&state.pool, project_id, user.user_id).await?;
    let resources = ResourceRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(resources))
}

/// GET /api/v1/resources/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Resource>> {
    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| resource_not_found(id))?;
    require_access(&state.pool, resource.project_id, user.user_id).await?;
    Ok(Json(resource))
}

/// PUT /api/v1/resources/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateResource>,
) -> AppResult<Json<Resource>> {
    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| resource_not_found(id))?;
    require_access(&state.pool, resource.project_id, user.user_id).await?;

    let updated = ResourceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| resource_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/resources/{id} -- takes its task assignments with
/// it. Repeat deletion is a no-op success.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let resource = ResourceRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| resource_not_found(id))?;
    require_access(&state.pool, resource.project_id, user.user_id).await?;

    let outcome = LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::Resource, id).await?;
    let message = match outcome {
        CascadeOutcome::Deleted => "Resource and its assignments soft-deleted successfully",
        CascadeOutcome::AlreadyDeleted => "Resource already deleted",
        CascadeOutcome::NotFound => return Err(resource_not_found(id)),
    };
    Ok(Json(MessageResponse::new(message)))
}

// ---------------------------------------------------------------------------
// Task assignments
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks/{id}/resources -- assign a resource to a task.
pub async fn assign_to_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    Json(input): Json<CreateActivityResource>,
) -> AppResult<(StatusCode, Json<ActivityResource>)> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;
    require_access(&state.pool, task.project_id, user.user_id).await?;

    let resource = ResourceRepo::find_by_id(&state.pool, input.resource_id)
        .await?
        .ok_or_else(|| resource_not_found(input.resource_id))?;
    if resource.project_id != task.project_id {
        return Err(AppError::BadRequest(
            "Resource belongs to a different project".into(),
        ));
    }

    let assignment = ActivityResourceRepo::create(&state.pool, task_id, &input).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// GET /api/v1/tasks/{id}/resources
pub async fn list_for_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<ActivityResource>>> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;
    require_access(&state.pool, task.project_id, user.user_id).await?;

    let assignments = ActivityResourceRepo::list_by_task(&state.pool, task_id).await?;
    Ok(Json(assignments))
}
