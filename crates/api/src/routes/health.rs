//! Liveness/readiness probe.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Routes mounted at the application root (outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health -- reports process and database health.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match taskup_db::health_check(&state.pool).await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "database health check failed");
            "unreachable"
        }
    };

    Json(json!({
        "status": "ok",
        "database": database,
    }))
}
