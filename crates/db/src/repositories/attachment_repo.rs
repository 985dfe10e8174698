//! Repository for the `attachments` table.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::attachment::{Attachment, CreateAttachment};

/// Column list shared across attachment queries.
const COLUMNS: &str = "id, project_id, uploaded_by, entity_type, entity_id, file_name, \
                       content_type, file_size, file_path, is_deleted, created_at, updated_at";

/// Provides CRUD operations for attachment metadata.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Record an uploaded file, returning the row.
    pub async fn create(
        pool: &PgPool,
        uploaded_by: DbId,
        input: &CreateAttachment,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments (project_id, uploaded_by, entity_type, entity_id,
                                      file_name, content_type, file_size, file_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(input.project_id)
            .bind(uploaded_by)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.file_name)
            .bind(&input.content_type)
            .bind(input.file_size)
            .bind(&input.file_path)
            .fetch_one(pool)
            .await
    }

    /// Find an attachment by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM attachments WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an attachment by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE id = $1");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All live attachments of a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments \
             WHERE project_id = $1 AND is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// All live attachments hanging off one entity within a project.
    pub async fn list_by_entity(
        pool: &PgPool,
        project_id: DbId,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments \
             WHERE project_id = $1 AND entity_type = $2 AND entity_id = $3 \
               AND is_deleted = FALSE \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(project_id)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }
}
