//! Route definitions for directly-addressed stakeholders.
//!
//! Creation and listing live under `/projects/{id}/stakeholders`.

use axum::routing::get;
use axum::Router;

use crate::handlers::stakeholder;
use crate::state::AppState;

/// Routes merged at the API root.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/stakeholders/{id}",
        get(stakeholder::get_by_id)
            .put(stakeholder::update)
            .delete(stakeholder::delete),
    )
}
