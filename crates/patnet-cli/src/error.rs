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

    /// Harvest run failed
    #[error("Harvest failed: {0}")]
    Harvest(#[from] patnet_harvester::HarvesterError),

    /// Graph storage error
    #[error("Storage error: {0}")]
    Store(#[from] patnet_store::StoreError),

    /// Linked-data client error
    #[error("Linked-data error: {0}")]
    LinkedData(#[from] patnet_sparql::SparqlError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
