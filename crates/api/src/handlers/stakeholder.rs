//! Handlers for project stakeholders.
//!
//! All mutations are owner-only; the percentage bound is validated
//! before anything is persisted.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;
use taskup_core::validation::validate_percentage;
use taskup_db::models::stakeholder::{CreateStakeholder, Stakeholder, UpdateStakeholder};
use taskup_db::repositories::{
    AccessRepo, CascadeOutcome, LifecycleRepo, StakeholderRepo, UserRepo,
};

use crate::authz::{require_access, require_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

fn stakeholder_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Stakeholder",
        id,
    })
}

/// POST /api/v1/projects/{id}/stakeholders -- owner only.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(mut input): Json<CreateStakeholder>,
) -> AppResult<(StatusCode, Json<Stakeholder>)> {
    input.project_id = project_id;
    require_owner(&state.pool, project_id, user.user_id).await?;
    validate_percentage(input.percentage).map_err(AppError::Core)?;

    if input.user_id == user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "The project owner cannot be a stakeholder".into(),
        )));
    }
    if !UserRepo::exists_by_id(&state.pool, input.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }));
    }
    if StakeholderRepo::find_by_project_and_user(&state.pool, project_id, input.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User is already a stakeholder of this project".into(),
        )));
    }

    let stakeholder = StakeholderRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(stakeholder)))
}

/// GET /api/v1/projects/{id}/stakeholders
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Stakeholder>>> {
    require_access(&state.pool, project_id, user.user_id).await?;
    let stakeholders = StakeholderRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(stakeholders))
}

/// GET /api/v1/stakeholders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Stakeholder>> {
    let stakeholder = StakeholderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| stakeholder_not_found(id))?;
    require_access(&state.pool, stakeholder.project_id, user.user_id).await?;
    Ok(Json(stakeholder))
}

/// PUT /api/v1/stakeholders/{id} -- owner only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStakeholder>,
) -> AppResult<Json<Stakeholder>> {
    let stakeholder = StakeholderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| stakeholder_not_found(id))?;
    require_owner(&state.pool, stakeholder.project_id, user.user_id).await?;

    if let Some(percentage) = input.percentage {
        validate_percentage(percentage).map_err(AppError::Core)?;
    }

    let updated = StakeholderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| stakeholder_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/stakeholders/{id} -- owner only. Soft-deletes the
/// row; repeat deletion is a no-op success.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let stakeholder = StakeholderRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| stakeholder_not_found(id))?;

    match AccessRepo::is_owner(&state.pool, stakeholder.project_id, user.user_id).await? {
        Some(true) => {}
        Some(false) => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only the project owner can delete stakeholders".into(),
            )))
        }
        // Project itself deleted: its stakeholders went with it.
        None => {
            return Ok(Json(MessageResponse::new("Stakeholder already deleted")));
        }
    }

    let outcome =
        LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::Stakeholder, id).await?;
    let message = match outcome {
        CascadeOutcome::Deleted => "Stakeholder deleted successfully",
        CascadeOutcome::AlreadyDeleted => "Stakeholder already deleted",
        CascadeOutcome::NotFound => return Err(stakeholder_not_found(id)),
    };
    Ok(Json(MessageResponse::new(message)))
}
