//! WebSocket endpoint for project chat.
//!
//! Clients connect to `/projects/{id}/chat/ws?token=<jwt>`. The token
//! and project access are checked before any message flows; failures
//! close the socket with policy-violation code 1008, mirroring the
//! behaviour HTTP clients get as 401/403/404. Inbound messages are
//! persisted first, then broadcast to everyone in the room.

use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use taskup_core::types::DbId;
use taskup_db::repositories::{AccessRepo, ChatRepo};

use crate::auth::jwt::validate_token;
use crate::state::AppState;
use crate::ws::rooms::ChatRooms;

/// WebSocket close code for authentication/authorization failures.
const POLICY_VIOLATION: u16 = 1008;

/// Query parameters of the chat upgrade request. Browsers cannot set
/// an Authorization header on WebSocket upgrades, so the token rides
/// in the query string.
#[derive(Debug, Deserialize)]
pub struct ChatWsQuery {
    pub token: String,
}

/// Inbound chat payload.
#[derive(Debug, Deserialize)]
struct InboundMessage {
    content: String,
}

/// GET /projects/{id}/chat/ws -- upgrade to the project chat socket.
pub async fn chat_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(query): Query<ChatWsQuery>,
) -> impl IntoResponse {
    // Authenticate and authorize before entering the room. Failures
    // are reported on the socket itself (1008) so browser clients see
    // a deliberate close instead of a failed upgrade.
    let user_id = match validate_token(&query.token, &state.config.jwt) {
        Ok(claims) => claims.sub,
        Err(_) => return ws.on_upgrade(|socket| close_policy(socket, "invalid token")),
    };

    let allowed = AccessRepo::has_access(&state.pool, project_id, user_id).await;
    match allowed {
        Ok(Some(true)) => {}
        Ok(Some(false)) => {
            return ws.on_upgrade(|socket| close_policy(socket, "not a project member"))
        }
        Ok(None) => return ws.on_upgrade(|socket| close_policy(socket, "project not found")),
        Err(e) => {
            tracing::error!(error = %e, "chat access check failed");
            return ws.on_upgrade(|socket| close_policy(socket, "internal error"));
        }
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state, project_id, user_id))
}

/// Close the socket with a policy-violation frame.
async fn close_policy(mut socket: WebSocket, reason: &'static str) {
    let frame = CloseFrame {
        code: POLICY_VIOLATION,
        reason: reason.into(),
    };
    let _ = socket.send(Message::Close(Some(frame))).await;
}

/// Manage a single chat connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Joins the project room and gets the outbound receiver.
///   2. Spawns a sender task forwarding room messages to the sink.
///   3. Persists and broadcasts inbound messages on the current task.
///   4. Leaves the room on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, project_id: DbId, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, %project_id, %user_id, "chat connected");

    let rooms: Arc<ChatRooms> = Arc::clone(&state.chat_rooms);
    let mut rx = rooms.join(project_id, conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "chat sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let content = match serde_json::from_str::<InboundMessage>(&text) {
                    Ok(inbound) => inbound.content,
                    // Plain text is accepted as-is.
                    Err(_) => text.to_string(),
                };
                if content.trim().is_empty() {
                    continue;
                }

                match ChatRepo::insert(&state.pool, project_id, user_id, &content).await {
                    Ok(stored) => {
                        let payload = serde_json::to_string(&stored)
                            .expect("chat message serializes to JSON");
                        rooms.broadcast(project_id, Message::Text(payload.into())).await;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to persist chat message");
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "chat receive error");
                break;
            }
        }
    }

    rooms.leave(project_id, &conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, %project_id, "chat disconnected");
}
