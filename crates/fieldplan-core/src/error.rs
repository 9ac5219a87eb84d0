//! Core error types for fieldplan-core.
//!
//! This module defines the error hierarchy using thiserror. Each subsystem
//! has its own enum, nested under [`CoreError`] so callers can match on the
//! failing concern without string inspection.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fieldplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Local storage errors (draft snapshot, keyring)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scheduling-service API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Draft-snapshot and credential storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a storage file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a storage file
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The draft snapshot exists but is not a valid form document.
    /// Deliberately not swallowed: a corrupt draft must surface instead of
    /// being silently replaced by an empty form.
    #[error("Draft snapshot at {path} is corrupt: {source}")]
    CorruptDraft {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// OS keyring access failed
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Errors talking to the external scheduling service.
///
/// Requests are never retried; a failed call surfaces here and the caller
/// decides how to report it.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend rejected the request (non-2xx). The message is taken
    /// from the response body's `message` field when present.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection or protocol failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Base URL or path could not be parsed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Validation errors.
///
/// Produced by form validation before any network call; the operation never
/// reaches the API layer when any of these are present.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is empty
    #[error("'{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// No deadline set on the draft
    #[error("No deadline set")]
    MissingDeadline,

    /// Deadline lies in the past
    #[error("Deadline {deadline} is not in the future")]
    DeadlineNotFuture {
        deadline: chrono::DateTime<chrono::Utc>,
    },

    /// Required collection is empty
    #[error("At least one {0} is required")]
    EmptyCollection(&'static str),

    /// Work day outside 0..=6
    #[error("Work day {day} is out of range (0 = Sunday .. 6 = Saturday)")]
    InvalidWorkDay { day: u8 },

    /// Time slot with start >= end
    #[error("Invalid time slot: start ({start}) must be before end ({end})")]
    InvalidTimeRange { start: String, end: String },

    /// A selected store has no configured activity
    #[error("Store '{store_name}' has no activities configured")]
    StoreWithoutActivities {
        store_id: String,
        store_name: String,
    },

    /// MANUAL assignment with no assigned workers
    #[error("Activity '{task_name}' uses manual assignment but has no assigned workers")]
    MissingAssignees {
        store_activity_id: String,
        task_name: String,
    },

    /// Repetition count below 1
    #[error("Activity '{task_name}' has invalid repetition count {value}")]
    InvalidRepetitions {
        store_activity_id: String,
        task_name: String,
        value: u32,
    },

    /// Estimated minutes per task must be positive
    #[error("Activity '{task_name}' has invalid estimated time {value}")]
    InvalidEstimatedTime { task_name: String, value: u32 },

    /// Custom schedule enabled with zero slots
    #[error("Activity '{task_name}' enables a custom schedule but lists no time slots")]
    EmptyCustomSlots {
        store_activity_id: String,
        task_name: String,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
