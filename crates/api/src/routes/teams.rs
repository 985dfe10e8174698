//! Route definitions for the `/teams` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::team;
use crate::state::AppState;

/// Routes mounted at `/teams`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(team::create))
        .route(
            "/{id}",
            get(team::get_by_id).put(team::update).delete(team::delete),
        )
        .route(
            "/{id}/members",
            get(team::list_members).post(team::add_member),
        )
        .route("/{id}/members/{user_id}", delete(team::remove_member))
        .route("/{id}/tasks", get(team::list_tasks))
}
