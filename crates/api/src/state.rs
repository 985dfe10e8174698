use std::sync::Arc;

use taskup_core::verification::VerificationCodes;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::storage::FileStore;
use crate::ws::ChatRooms;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskup_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-project chat room connection manager.
    pub chat_rooms: Arc<ChatRooms>,
    /// Pending email verification codes (instance-scoped, not global).
    pub verification: Arc<VerificationCodes>,
    /// Outbound mailer; `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
    /// Attachment file storage rooted at the configured upload dir.
    pub files: Arc<FileStore>,
}
