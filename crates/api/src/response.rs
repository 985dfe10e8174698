//! Shared response types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` body for operations whose outcome is
/// a statement rather than an entity (deletions, idempotent no-ops).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
