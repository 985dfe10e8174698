//! Handlers for attachments: multipart upload, metadata, download,
//! and soft delete. Bytes go through the file store; only metadata
//! lives in the database.

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;
use taskup_db::models::attachment::{entity_type, Attachment, CreateAttachment};
use taskup_db::repositories::{AttachmentRepo, CascadeOutcome, LifecycleRepo};

use crate::authz::require_access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

fn attachment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Attachment",
        id,
    })
}

/// Entity kinds an attachment may reference.
const VALID_ENTITY_TYPES: &[&str] = &[
    entity_type::PROJECT,
    entity_type::TASK,
    entity_type::SCOPE,
    entity_type::RISK,
];

/// POST /api/v1/projects/{id}/attachments -- multipart upload.
///
/// Fields: `file` (required), `entity_type` (optional, defaults to
/// `project`), `entity_id` (optional).
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Attachment>)> {
    require_access(&state.pool, project_id, user.user_id).await?;

    let mut entity_kind = entity_type::PROJECT.to_string();
    let mut entity_id: Option<DbId> = None;
    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("entity_type") => {
                entity_kind = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid entity_type: {e}")))?;
            }
            Some("entity_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid entity_id: {e}")))?;
                let id = text
                    .parse()
                    .map_err(|_| AppError::BadRequest("entity_id must be a UUID".into()))?;
                entity_id = Some(id);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                file = Some((file_name, content_type, bytes));
            }
            _ => {}
        }
    }

    if !VALID_ENTITY_TYPES.contains(&entity_kind.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown attachment entity type: {entity_kind}"
        ))));
    }
    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Missing file field".into()))?;

    let stored_path = state
        .files
        .store(&file_name, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("failed to store file: {e}")))?;

    let attachment = AttachmentRepo::create(
        &state.pool,
        user.user_id,
        &CreateAttachment {
            project_id,
            entity_type: entity_kind,
            entity_id,
            file_name,
            content_type,
            file_size: Some(bytes.len() as i64),
            file_path: stored_path,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(attachment)))
}

/// Optional entity filter on the listing endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct ListQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
}

/// GET /api/v1/projects/{id}/attachments
///
/// With both `entity_type` and `entity_id` query parameters, only the
/// attachments of that entity are returned.
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Attachment>>> {
    require_access(&state.pool, project_id, user.user_id).await?;

    let attachments = match (query.entity_type.as_deref(), query.entity_id) {
        (Some(entity_kind), Some(entity_id)) => {
            AttachmentRepo::list_by_entity(&state.pool, project_id, entity_kind, entity_id).await?
        }
        _ => AttachmentRepo::list_by_project(&state.pool, project_id).await?,
    };
    Ok(Json(attachments))
}

/// GET /api/v1/attachments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Attachment>> {
    let attachment = AttachmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| attachment_not_found(id))?;
    require_access(&state.pool, attachment.project_id, user.user_id).await?;
    Ok(Json(attachment))
}

/// GET /api/v1/attachments/{id}/download -- the stored bytes.
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let attachment = AttachmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| attachment_not_found(id))?;
    require_access(&state.pool, attachment.project_id, user.user_id).await?;

    let bytes = state
        .files
        .read(&attachment.file_path)
        .await
        .map_err(|e| AppError::InternalError(format!("failed to read stored file: {e}")))?;

    let mut headers = HeaderMap::new();
    let content_type = attachment
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    let disposition = format!("attachment; filename=\"{}\"", attachment.file_name);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    Ok((headers, bytes))
}

/// DELETE /api/v1/attachments/{id} -- repeat deletion is a no-op
/// success. The stored file is kept; only the metadata row is marked.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let attachment = AttachmentRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| attachment_not_found(id))?;
    require_access(&state.pool, attachment.project_id, user.user_id).await?;

    let outcome = LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::Attachment, id).await?;
    let message = match outcome {
        CascadeOutcome::Deleted => "Attachment deleted successfully",
        CascadeOutcome::AlreadyDeleted => "Attachment already deleted",
        CascadeOutcome::NotFound => return Err(attachment_not_found(id)),
    };
    Ok(Json(MessageResponse::new(message)))
}
