//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me/teams", get(user::my_teams))
        .route("/me/tasks/assigned", get(user::my_assigned_tasks))
        .route("/me/tasks/created", get(user::my_created_tasks))
        .route("/{id}", get(user::get_by_id))
}
