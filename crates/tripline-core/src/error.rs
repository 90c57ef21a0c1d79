//! Core error types for tripline-core.
//!
//! The layout and interaction engine never fails; these errors only surface at
//! the I/O boundary (configuration files, trip documents, validation).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tripline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors for trip documents.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two items share the same id
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    /// An operation referenced an item that is not in the trip
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Invalid value
    #[error("Invalid value for '{field}' on item '{id}': {message}")]
    InvalidValue {
        id: String,
        field: String,
        message: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
