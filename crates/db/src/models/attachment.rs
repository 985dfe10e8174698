//! Attachment metadata model and DTOs.
//!
//! Only metadata lives in the database; the bytes are written by the
//! API layer's file store and referenced through `file_path`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskup_core::types::{DbId, Timestamp};

/// Entity kinds an attachment can hang off.
pub mod entity_type {
    pub const PROJECT: &str = "project";
    pub const TASK: &str = "task";
    pub const SCOPE: &str = "scope";
    pub const RISK: &str = "risk";
}

/// An attachment row from the `attachments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub project_id: DbId,
    pub uploaded_by: DbId,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub file_name: String,
    pub content_type: Option<String>,
    pub file_size: Option<i64>,
    pub file_path: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an uploaded file.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttachment {
    pub project_id: DbId,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub file_name: String,
    pub content_type: Option<String>,
    pub file_size: Option<i64>,
    pub file_path: String,
}
