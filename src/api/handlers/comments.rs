use crate::api::errors::ApiError;
use crate::db::{Attachment, TaskComment};
use crate::db::{CommentRepository, Database};
use crate::storage::BlobStore;
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};

/// Comment representation returned by the API, attachment metadata
/// expanded from its JSON column
#[derive(Serialize)]
pub struct CommentDto {
    pub id: String,
    pub task_id: String,
    pub author: String,
    pub content: String,
    pub content_type: String,
    pub attachments: Vec<Attachment>,
    pub created_at: String,
}

impl From<TaskComment> for CommentDto {
    fn from(comment: TaskComment) -> Self {
        CommentDto {
            attachments: serde_json::from_str(&comment.attachments).unwrap_or_default(),
            id: comment.id,
            task_id: comment.task_id,
            author: comment.author,
            content: comment.content,
            content_type: comment.content_type,
            created_at: comment.created_at,
        }
    }
}

/// Represents the request payload for adding a comment
#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub author: String,
    pub content: String,
    /// "text" (default) or "markdown"
    pub content_type: Option<String>,
    /// Metadata of blobs already placed in the blob store
    pub attachments: Option<Vec<Attachment>>,
}

/// Lists the comments on a task, oldest first
#[axum::debug_handler]
pub async fn get_task_comments(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<CommentDto>>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = CommentRepository::new(&mut conn);
    let comments = repo.get_comments(&id)?;
    Ok(Json(comments.into_iter().map(CommentDto::from).collect()))
}

/// Adds a comment, with optional attachments, to a task
#[axum::debug_handler]
pub async fn add_task_comment(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<Json<CommentDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = CommentRepository::new(&mut conn);

    let comment = repo.add_comment(
        &id,
        payload.author,
        payload.content,
        payload.content_type.unwrap_or_else(|| "text".to_string()),
        payload.attachments.unwrap_or_default(),
    )?;

    Ok(Json(comment.into()))
}

/// Deletes a comment and its attachment blobs
#[axum::debug_handler]
pub async fn remove_comment(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
    Extension(blobs): Extension<BlobStore>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = CommentRepository::new(&mut conn);
    repo.remove_comment(&blobs, &id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
