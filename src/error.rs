//! Error types shared by the service layers.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// No conversation with this id exists in the current process.
    #[error("conversation not found: {0}")]
    ConversationNotFound(Uuid),
    /// No simulated upload or generation job with this id.
    #[error("job not found: {0}")]
    JobNotFound(Uuid),
    /// Input was blank or otherwise unusable.
    #[error("rejected input: {0}")]
    Rejected(&'static str),
    /// The reply worker went away before answering, e.g. the conversation was deleted.
    #[error("reply for conversation {0} was dropped")]
    ReplyDropped(Uuid),
}

pub type AppResult<T> = Result<T, AppError>;
