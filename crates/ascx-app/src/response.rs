// Rust guideline compliant 2026-10-12

//! Response envelope for structured error output.

use crate::error::{AppError, ErrorCode};
use serde::Serialize;

/// Standard error envelope written when JSON output is selected.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Creates a new error envelope from an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }

    /// Creates an envelope for errors raised outside the application layer.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Unknown,
            message: message.into(),
            details: None,
        }
    }
}
