//! Repository for the `chat_messages` table.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::chat::ChatMessage;

/// Column list shared across chat queries.
const COLUMNS: &str = "id, project_id, user_id, content, sent_at";

/// Default number of messages returned by history queries.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Provides persistence for project chat messages.
pub struct ChatRepo;

impl ChatRepo {
    /// Persist a message, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (project_id, user_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// The most recent messages of a project, oldest first.
    pub async fn list_recent(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (\
                 SELECT {COLUMNS} FROM chat_messages \
                 WHERE project_id = $1 ORDER BY sent_at DESC LIMIT $2\
             ) recent ORDER BY sent_at"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
