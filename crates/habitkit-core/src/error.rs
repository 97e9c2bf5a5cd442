//! Core error types for habitkit-core.
//!
//! Rule validation happens once, when a habit is constructed. Once a
//! [`crate::Habit`] exists its rule is known to be valid, so nothing in the
//! statistics path returns a [`RuleError`].

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for habitkit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Habit rule failed validation
    #[error("Invalid habit rule: {0}")]
    Rule(#[from] RuleError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage/snapshot errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Construction-time validation errors for a habit's recurrence rule and
/// validity window.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// Weekly rule with no weekdays selected
    #[error("weekly rule must select at least one weekday")]
    EmptyWeekdays,

    /// Weekday outside 0 (Sunday) ..= 6 (Saturday)
    #[error("weekday {0} is out of range (expected 0..=6, 0 = Sunday)")]
    WeekdayOutOfRange(i64),

    /// Interval rule with zero or negative step
    #[error("interval must be a positive number of days, got {0}")]
    NonPositiveInterval(i64),

    /// Validity window closes before it opens
    #[error("end date ({end}) is before start date ({start})")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    /// Unknown rule type in a raw record
    #[error("unknown frequency type '{0}'")]
    UnknownType(String),

    /// A field required by the rule type is missing
    #[error("frequency type '{kind}' requires field '{field}'")]
    MissingField { kind: String, field: &'static str },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed into the key's type
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Snapshot/storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Snapshot file could not be read
    #[error("Failed to read snapshot at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON for the expected shape
    #[error("Failed to parse snapshot at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot could not be written
    #[error("Failed to write snapshot at {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
