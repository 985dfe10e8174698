//! Handlers for the one-per-project scope document.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::types::DbId;
use taskup_core::validation::validate_date_range;
use taskup_db::models::scope::{CreateScope, ProjectScope, UpdateScope};
use taskup_db::repositories::ScopeRepo;

use crate::authz::{require_access, require_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/scope -- owner only; a project can hold
/// at most one live scope.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateScope>,
) -> AppResult<(StatusCode, Json<ProjectScope>)> {
    require_owner(&state.pool, project_id, user.user_id).await?;
    validate_date_range(input.start_date, input.end_date).map_err(AppError::Core)?;

    if ScopeRepo::find_by_project(&state.pool, project_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Project already has a scope".into(),
        )));
    }

    let scope = ScopeRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(scope)))
}

/// GET /api/v1/projects/{id}/scope
pub async fn get_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ProjectScope>> {
    require_access(&state.pool, project_id, user.user_id).await?;
    let scope = ScopeRepo::find_by_project(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project scope",
            id: project_id,
        }))?;
    Ok(Json(scope))
}

/// PUT /api/v1/projects/{id}/scope -- owner only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateScope>,
) -> AppResult<Json<ProjectScope>> {
    require_owner(&state.pool, project_id, user.user_id).await?;
    validate_date_range(input.start_date, input.end_date).map_err(AppError::Core)?;

    let scope = ScopeRepo::update_by_project(&state.pool, project_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project scope",
            id: project_id,
        }))?;
    Ok(Json(scope))
}
