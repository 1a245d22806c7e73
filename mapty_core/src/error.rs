//! Error types for the mapty_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mapty_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A numeric precondition was violated or the workout type is unknown
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// No workout with the given id is held by the store
    #[error("Workout not found: {0}")]
    NotFound(String),

    /// The persistence backend could not be read or written
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Wrap a lower-level failure raised while talking to a backend
    pub(crate) fn persistence(err: impl std::fmt::Display) -> Self {
        Error::PersistenceUnavailable(err.to_string())
    }
}
