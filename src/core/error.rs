//! Error types for queue operations and job handlers.

use thiserror::Error;

/// Errors produced by the scheduler's fallible operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Submitted job is not usable (e.g. no input path).
    #[error("invalid job: {0}")]
    InvalidJob(String),
    /// No tokio runtime is available to spawn background runs on.
    #[error("no tokio runtime available")]
    NoRuntime,
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// What a job handler may fail with.
///
/// Anything other than [`HandlerError::Cancelled`] marks the job `Failed`.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler observed its cancellation token and gave up.
    #[error("cancelled")]
    Cancelled,
    /// The handler failed with a message.
    #[error("{0}")]
    Failed(String),
    /// Any other error raised by the handler.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Whether this error represents cooperative cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
