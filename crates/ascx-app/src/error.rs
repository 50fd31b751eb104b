// Rust guideline compliant 2026-10-12

//! Error handling for ascx application services.

use ascx_core::{CursorError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for structured error output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed or conflicting command input.
    UsageError,
    /// A `--next` cursor failed validation.
    InvalidCursor,
    /// The API reported the resource as missing.
    NotFound,
    /// The API answered with a non-success status.
    ApiError,
    /// The request never produced a response.
    TransportError,
    /// The response did not have the expected shape.
    InvalidResponse,
    /// The operation was cancelled.
    Cancelled,
    /// The configured timeout elapsed.
    Timeout,
    /// Configuration could not be loaded or is invalid.
    ConfigError,
    /// JSON serialization or parsing failed.
    JsonError,
    /// IO failure.
    IoError,
    /// A dashboard section could not be built.
    SectionFailed,
    /// A readiness check found blocking issues.
    NotReady,
    /// A fallback for unexpected errors.
    Unknown,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or conflicting input, detected before any request.
    #[error("{0}")]
    Usage(String),

    /// A resume cursor was rejected.
    #[error("{command}: --next {source}")]
    InvalidCursor {
        /// Command path, e.g. `bundle-ids list`.
        command: String,
        /// Validation failure.
        source: CursorError,
    },

    /// A request failed in a context worth naming.
    #[error("{context}: {source}")]
    Request {
        /// What was being fetched, prefixed with the command path.
        context: String,
        /// Underlying failure.
        source: CoreError,
    },

    /// One dashboard section failed.
    #[error("{name}: {source}")]
    Section {
        /// Section task label.
        name: String,
        /// Underlying failure.
        source: Box<AppError>,
    },

    /// Failure attributed to a command path.
    #[error("{command}: {source}")]
    Command {
        /// Command path.
        command: String,
        /// Underlying failure.
        source: Box<AppError>,
    },

    /// A readiness run completed with blocking issues.
    #[error("{0}")]
    NotReady(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Failure outside the request path, e.g. worker pool setup.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Attributes this error to a command path.
    #[must_use]
    pub fn in_command(self, command: &str) -> Self {
        AppError::Command {
            command: command.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns whether the error stems from caller input rather than a request.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        match self {
            AppError::Usage(_) | AppError::InvalidCursor { .. } => true,
            AppError::Command { source, .. } => source.is_usage(),
            _ => false,
        }
    }

    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Usage(_) => ErrorCode::UsageError,
            AppError::InvalidCursor { .. } => ErrorCode::InvalidCursor,
            AppError::Section { .. } => ErrorCode::SectionFailed,
            AppError::Command { source, .. } => source.code(),
            AppError::NotReady(_) => ErrorCode::NotReady,
            AppError::Internal(_) => ErrorCode::Unknown,
            AppError::Request { source, .. } | AppError::Core(source) => core_code(source),
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::InvalidCursor { command, .. } => Some(serde_json::json!({
                "command": command,
            })),
            AppError::Section { name, .. } => Some(serde_json::json!({
                "section": name,
            })),
            AppError::Command { command, source } => {
                let mut details = serde_json::json!({ "command": command });
                if let (Some(inner), Some(map)) = (source.details(), details.as_object_mut()) {
                    if let Some(inner) = inner.as_object() {
                        map.extend(inner.clone());
                    }
                }
                Some(details)
            }
            AppError::Request { source, .. } | AppError::Core(source) => match source {
                CoreError::Status { status, .. } => Some(serde_json::json!({
                    "status": status,
                })),
                _ => None,
            },
            _ => None,
        }
    }
}

fn core_code(error: &CoreError) -> ErrorCode {
    match error {
        CoreError::NotFound(_) => ErrorCode::NotFound,
        CoreError::Status { .. } => ErrorCode::ApiError,
        CoreError::Transport(_) => ErrorCode::TransportError,
        CoreError::InvalidResponse(_) => ErrorCode::InvalidResponse,
        CoreError::Cursor(_) => ErrorCode::InvalidCursor,
        CoreError::Cancelled => ErrorCode::Cancelled,
        CoreError::DeadlineExceeded => ErrorCode::Timeout,
        CoreError::Config(_) => ErrorCode::ConfigError,
        CoreError::Json(_) => ErrorCode::JsonError,
        CoreError::Io(_) => ErrorCode::IoError,
    }
}
