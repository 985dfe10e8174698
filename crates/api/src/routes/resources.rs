//! Route definitions for resources.
//!
//! Per-project listing lives under `/projects/{id}/resources`;
//! task assignments under `/tasks/{id}/resources`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::resource;
use crate::state::AppState;

/// Routes merged at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resources", post(resource::create))
        .route(
            "/resources/{id}",
            get(resource::get_by_id)
                .put(resource::update)
                .delete(resource::delete),
        )
}
