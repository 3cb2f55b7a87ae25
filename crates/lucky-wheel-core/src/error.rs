//! Error types for the wheel core.

use thiserror::Error;

use crate::options::SEGMENT_COUNT;

/// Result type alias for wheel operations.
pub type WheelResult<T> = Result<T, WheelError>;

/// Errors that can occur while editing or persisting the wheel.
#[derive(Debug, Error)]
pub enum WheelError {
    /// An edit did not produce exactly eight labels.
    #[error("expected {expected} labels, got {found}", expected = SEGMENT_COUNT)]
    WrongLabelCount { found: usize },

    /// The backing key-value store rejected an operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// Persisted value could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file-backed store).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl WheelError {
    /// Create a storage error from any displayable cause.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
