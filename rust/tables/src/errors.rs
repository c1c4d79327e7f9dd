//! Errors surfaced by the table manager.
//!
//! Engine rejections pass through unchanged inside [`TableError::Game`]; the
//! manager adds lookup and storage failures of its own.
use cardroom_engine::errors::{ErrorKind, GameError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::manager::TableId;

/// Machine-readable error payload for whatever transport sits on top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Error code, e.g. `"table_not_found"`
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Who is at fault, which decides the log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad request from a client; expected during normal play
    Client,
    /// Unexpected failure inside the manager
    Server,
    /// Shared state can no longer be trusted
    Critical,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table {0} not found")]
    NotFound(TableId),
    #[error("unknown bot kind {0:?}")]
    UnknownBot(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("table storage lock poisoned")]
    StoragePoisoned,
}

impl TableError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TableError::NotFound(_) => "table_not_found",
            TableError::UnknownBot(_) => "unknown_bot",
            TableError::Game(err) => match err.kind() {
                ErrorKind::Validation => "invalid_action",
                ErrorKind::Capacity => "table_capacity",
                ErrorKind::State => "invalid_state",
                ErrorKind::Config => "invalid_config",
            },
            TableError::StoragePoisoned => "storage_error",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TableError::StoragePoisoned => ErrorSeverity::Critical,
            _ => ErrorSeverity::Client,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            TableError::NotFound(id) => ErrorResponse::with_details(
                self.error_code(),
                self.to_string(),
                serde_json::json!({ "table_id": id }),
            ),
            TableError::Game(err) => ErrorResponse::with_details(
                self.error_code(),
                self.to_string(),
                serde_json::json!({ "kind": err.kind() }),
            ),
            _ => ErrorResponse::new(self.error_code(), self.to_string()),
        }
    }

    /// Logs at the level matching [`TableError::severity`].
    pub fn log(&self) {
        let code = self.error_code();
        match self.severity() {
            ErrorSeverity::Client => tracing::info!(error = code, "client error: {}", self),
            ErrorSeverity::Server => tracing::error!(error = code, "server error: {}", self),
            ErrorSeverity::Critical => {
                tracing::error!(error = code, critical = true, "critical error: {}", self)
            }
        }
    }
}
