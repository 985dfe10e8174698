//! Route definitions for directly-addressed attachments.
//!
//! Upload and per-project listing live under
//! `/projects/{id}/attachments`.

use axum::routing::get;
use axum::Router;

use crate::handlers::attachment;
use crate::state::AppState;

/// Routes merged at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/attachments/{id}",
            get(attachment::get_by_id).delete(attachment::delete),
        )
        .route("/attachments/{id}/download", get(attachment::download))
}
