//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record not found
    #[error("No record with id {0}")]
    NotFound(String),

    /// Extraction pipeline error
    #[error(transparent)]
    Extraction(#[from] wwallet_extractor::ExtractionError),

    /// Record store error
    #[error(transparent)]
    Store(#[from] wwallet_store::StoreError),

    /// Web search error
    #[error(transparent)]
    Search(#[from] wwallet_search::SearchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
