//! REST handlers for project chat: history and presence. The live
//! socket lives in `crate::ws::handler`.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use taskup_core::types::DbId;
use taskup_db::models::chat::ChatMessage;
use taskup_db::repositories::chat_repo::DEFAULT_HISTORY_LIMIT;
use taskup_db::repositories::ChatRepo;

use crate::authz::require_access;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/projects/{id}/chat/messages
pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    require_access(&state.pool, project_id, user.user_id).await?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, 500);
    let messages = ChatRepo::list_recent(&state.pool, project_id, limit).await?;
    Ok(Json(messages))
}

/// GET /api/v1/projects/{id}/chat/presence -- user ids currently in
/// the room.
pub async fn presence(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<DbId>>> {
    require_access(&state.pool, project_id, user.user_id).await?;
    let users = state.chat_rooms.present_users(project_id).await;
    Ok(Json(users))
}
