//! Error types for dbmessages
//!
//! `MessageError` covers every failure the crate can report. `LoadError` is the
//! narrower type a [`Loader`](crate::loader::Loader) fails with.

use thiserror::Error;

/// Result type alias for dbmessages operations
pub type Result<T> = std::result::Result<T, MessageError>;

/// Failure of a loader to produce a complete message table
#[derive(Error, Debug)]
pub enum LoadError {
    /// SQLite query or connection errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A row that cannot be turned into a message entry
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// Any other source failure
    #[error("Source error: {0}")]
    Source(String),
}

/// Comprehensive error type for dbmessages operations
#[derive(Error, Debug)]
pub enum MessageError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Loading the message table failed
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// No message is stored for the code and no default applies
    #[error("No message found under code '{code}'")]
    NoSuchMessage { code: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// SQLite errors outside of a load (schema setup, writes)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Metrics registry errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MessageError {
    /// True when the error came from a loader
    pub fn is_load_error(&self) -> bool {
        matches!(self, MessageError::Load(_))
    }
}
