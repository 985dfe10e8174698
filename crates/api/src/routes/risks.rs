//! Route definitions for risks, analyses, and response plans.
//!
//! Per-project listing lives under `/projects/{id}/risks`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::risk;
use crate::state::AppState;

/// Routes merged at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/risks", post(risk::create))
        .route(
            "/risks/{id}",
            get(risk::get_by_id).put(risk::update).delete(risk::delete),
        )
        .route(
            "/risks/{id}/analyses",
            get(risk::list_analyses).post(risk::create_analysis),
        )
        .route(
            "/risks/{id}/response-plans",
            get(risk::list_response_plans).post(risk::create_response_plan),
        )
        .route(
            "/risk-analyses/{id}",
            axum::routing::put(risk::update_analysis).delete(risk::delete_analysis),
        )
        .route(
            "/risk-plans/{id}",
            axum::routing::put(risk::update_response_plan).delete(risk::delete_response_plan),
        )
}
