//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{resource, task};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/subtasks", get(task::list_subtasks))
        .route(
            "/{id}/resources",
            get(resource::list_for_task).post(resource::assign_to_task),
        )
}
