//! Core error types for questlife-core.
//!
//! Every failed action leaves the session snapshot untouched; these types only
//! describe why the mutation was rejected.

use std::path::PathBuf;
use thiserror::Error;

use crate::quest::QuestId;

/// Core error type for questlife-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Quest repository errors
    #[error("Quest error: {0}")]
    Quest(#[from] QuestError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Quest timer errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Whether the rejected action was a harmless repeat rather than a fault.
    ///
    /// Completing an already completed quest is the only such case.
    pub fn is_noop(&self) -> bool {
        matches!(self, CoreError::Quest(QuestError::AlreadyCompleted(_)))
    }
}

/// Quest repository errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestError {
    /// No quest with this id exists
    #[error("Quest not found: {0}")]
    NotFound(QuestId),

    /// The quest has already been completed
    #[error("Quest already completed: {0}")]
    AlreadyCompleted(QuestId),
}

/// Validation errors for user-supplied values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Quest title is empty or whitespace only
    #[error("Quest title must not be empty")]
    EmptyTitle,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Quest timer errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// No timer has been started for this quest
    #[error("No timer for quest {0}")]
    NotFound(QuestId),

    /// Timers cannot be attached to completed quests
    #[error("Quest {0} is already completed")]
    QuestCompleted(QuestId),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
