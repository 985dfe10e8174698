//! Project chat message model.

use serde::Serialize;
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// A chat message row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub sent_at: Timestamp,
}
