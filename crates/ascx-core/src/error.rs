// Rust guideline compliant 2026-10-12

//! Error types for the ascx core library.

use crate::cursor::CursorError;
use thiserror::Error;

/// Result type alias for ascx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ascx operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API reported that the resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status other than 404.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error document, or the status reason.
        message: String,
    },

    /// A response decoded but did not carry the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A resume cursor failed origin or syntax validation.
    #[error(transparent)]
    Cursor(#[from] CursorError),

    /// The caller cancelled the operation.
    #[error("request cancelled")]
    Cancelled,

    /// The caller-supplied deadline elapsed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Invalid configuration value.
    #[error("Invalid config: {0}")]
    Config(String),
}

impl Error {
    /// Returns whether the API reported the resource as missing.
    ///
    /// Every other failure, including transport errors and non-404 statuses,
    /// is treated as "other".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
