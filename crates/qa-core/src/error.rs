//! Error types for qa-threads

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for qa-threads
#[derive(Debug, Error)]
pub enum QaError {
    /// A required field was missing or a value was rejected
    #[error("Validation error: {0}")]
    Validation(String),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Backend failure not covered by a more specific variant
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<QaError>,
    },
}

impl QaError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        QaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Classify the error into the kind reported to callers
    pub fn kind(&self) -> ErrorKind {
        match self {
            QaError::Validation(_) => ErrorKind::ValidationError,
            QaError::CommentNotFound(_) => ErrorKind::NotFound,
            QaError::WithContext { source, .. } => source.kind(),
            QaError::Storage(_)
            | QaError::Io(_)
            | QaError::Serde(_)
            | QaError::Toml(_)
            | QaError::Config(_) => ErrorKind::StorageError,
        }
    }
}

/// Error kind exposed in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing or rejected input
    ValidationError,
    /// Id does not resolve to a record
    NotFound,
    /// Underlying I/O or query fault
    StorageError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ValidationError => write!(f, "ValidationError"),
            ErrorKind::NotFound => write!(f, "NotFound"),
            ErrorKind::StorageError => write!(f, "StorageError"),
        }
    }
}

/// Result type alias for qa-threads
pub type Result<T> = std::result::Result<T, QaError>;
