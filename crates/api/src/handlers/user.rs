//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::types::DbId;
use taskup_db::models::task::Task;
use taskup_db::models::team::Team;
use taskup_db::models::user::User;
use taskup_db::repositories::{TaskRepo, TeamRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// GET /api/v1/users/me/teams -- live teams the caller belongs to.
pub async fn my_teams(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Team>>> {
    let teams = TeamRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(teams))
}

/// GET /api/v1/users/me/tasks/assigned
pub async fn my_assigned_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list_assigned_to(&state.pool, user.user_id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/users/me/tasks/created
pub async fn my_created_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list_created_by(&state.pool, user.user_id).await?;
    Ok(Json(tasks))
}
