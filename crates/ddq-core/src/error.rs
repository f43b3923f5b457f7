//! Error types for ddq-core

use thiserror::Error;

/// Result type alias using ddq-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ddq-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A view element required at startup is missing
    #[error("Required element not found: {0}")]
    MissingElement(&'static str),

    /// Speech engine error
    #[error("Speech error: {0}")]
    Speech(String),

    /// Network fetch error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Asset not available from cache or network
    #[error("Asset unavailable: {0}")]
    AssetUnavailable(String),
}
