use crate::constants::{ACTION_COMMENT_ADDED, ACTION_FILE_ATTACHED};
use crate::db::models::{Attachment, Task, TaskComment};
use crate::db::task_repository::insert_activity;
use crate::errors::Error;
use crate::schema::{task_comments, tasks};
use crate::storage::BlobStore;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::warn;
use uuid::Uuid;

/// Repository for task comments and their attachment metadata
pub struct CommentRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> CommentRepository<'a> {
    /// Creates a new CommentRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        CommentRepository { conn }
    }

    /// Retrieves all comments on a task, oldest first
    pub fn get_comments(&mut self, for_task: &str) -> Result<Vec<TaskComment>, Error> {
        use crate::schema::task_comments::dsl::*;
        let comments = task_comments
            .filter(task_id.eq(for_task))
            .order_by(created_at.asc())
            .load::<TaskComment>(self.conn)?;
        Ok(comments)
    }

    /// Retrieves a single comment by id
    ///
    /// # Errors
    ///
    /// Returns `Error::CommentNotFound` if no comment has this id
    pub fn get_comment(&mut self, comment_id: &str) -> Result<TaskComment, Error> {
        let found = task_comments::table
            .filter(task_comments::id.eq(comment_id))
            .first::<TaskComment>(self.conn)
            .optional()?;
        found.ok_or_else(|| Error::CommentNotFound(comment_id.to_string()))
    }

    /// Adds a comment to a task and records the matching activity
    /// entry (`file_attached` when the comment carries attachments,
    /// `comment_added` otherwise) in the same transaction.
    ///
    /// # Arguments
    ///
    /// * `for_task` - Task the comment belongs to
    /// * `author` - Agent or user writing the comment
    /// * `content` - Comment body
    /// * `content_type` - "text" or "markdown"
    /// * `attachments` - Metadata of files already placed in the blob
    ///   store
    ///
    /// # Returns
    ///
    /// The inserted comment row
    ///
    /// # Errors
    ///
    /// Returns `Error::TaskNotFound` if the task does not exist, or an
    /// Error if database operations fail
    pub fn add_comment(
        &mut self,
        for_task: &str,
        author: String,
        content: String,
        content_type: String,
        attachments: Vec<Attachment>,
    ) -> Result<TaskComment, Error> {
        let task = tasks::table
            .filter(tasks::id.eq(for_task))
            .first::<Task>(self.conn)
            .optional()?
            .ok_or_else(|| Error::TaskNotFound(for_task.to_string()))?;

        let now = Utc::now().to_rfc3339();
        let action = if attachments.is_empty() {
            ACTION_COMMENT_ADDED
        } else {
            ACTION_FILE_ATTACHED
        };

        let comment = TaskComment {
            id: Uuid::new_v4().to_string(),
            task_id: for_task.to_string(),
            author,
            content,
            content_type,
            attachments: serde_json::to_string(&attachments)?,
            created_at: now.clone(),
        };

        self.conn.transaction::<_, Error, _>(|conn| {
            diesel::insert_into(task_comments::table)
                .values(&comment)
                .execute(conn)?;

            insert_activity(
                conn,
                &comment.author,
                action,
                Some(for_task),
                serde_json::json!({ "title": task.title }),
                &now,
            )?;

            Ok(())
        })?;

        Ok(comment)
    }

    /// Deletes a comment. Attachment blobs are removed from the blob
    /// store first, then the row; blob deletion is best effort and a
    /// failed delete never blocks removing the record.
    ///
    /// # Errors
    ///
    /// Returns `Error::CommentNotFound` if no comment has this id
    pub fn remove_comment(&mut self, store: &BlobStore, comment_id: &str) -> Result<(), Error> {
        let comment = self.get_comment(comment_id)?;

        let attachments: Vec<Attachment> = serde_json::from_str(&comment.attachments)?;
        for attachment in &attachments {
            if let Err(e) = store.delete(&attachment.storage_ref) {
                warn!(
                    "Failed to delete blob {} for comment {}: {}",
                    attachment.storage_ref, comment_id, e
                );
            }
        }

        diesel::delete(task_comments::table.filter(task_comments::id.eq(comment_id)))
            .execute(self.conn)?;
        Ok(())
    }
}
