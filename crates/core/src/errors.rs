use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Unprocessable duration: {0}")]
    UnprocessableDuration(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl SlotError {
    /// The client-facing part of the error, without the kind prefix.
    ///
    /// Storage and internal failures collapse to a generic message so that
    /// driver details never reach a response body.
    pub fn public_message(&self) -> String {
        match self {
            SlotError::NotFound(msg)
            | SlotError::Validation(msg)
            | SlotError::Conflict(msg)
            | SlotError::PreconditionFailed(msg)
            | SlotError::UnprocessableDuration(msg) => msg.clone(),
            SlotError::Database(_) | SlotError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
