//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Template file could not be read or written.
    #[error("Template storage error: {0}")]
    Persistence(#[from] crate::template::PersistenceError),

    /// Template operation was rejected.
    #[error("Template error: {0}")]
    Template(#[from] crate::service::TemplateError),

    /// Mail client failed to deliver the message.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] crate::service::DispatchError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
