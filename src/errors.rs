use diesel::result::Error as DieselError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Diesel error: {0}")]
    DieselError(#[from] DieselError),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Task {0} not found")]
    TaskNotFound(String),
    #[error("Comment {0} not found")]
    CommentNotFound(String),
    #[error("Agent {0} not found")]
    AgentNotFound(String),
}

impl Error {
    /// True for the not-found family of errors, which map to HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::TaskNotFound(_) | Error::CommentNotFound(_) | Error::AgentNotFound(_)
        )
    }
}
