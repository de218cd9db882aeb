//! Error types for the Harvester

use patnet_domain::Window;
use patnet_store::StoreError;
use thiserror::Error;

/// Errors that abort a harvesting run
///
/// Per-publication problems (fetch failures, malformed records, unresolved
/// names) never surface here; they are counted in the run metrics.
#[derive(Error, Debug)]
pub enum HarvesterError {
    /// The publication listing for a window failed
    #[error("Listing publications for window {window} failed: {source}")]
    WindowListing {
        /// Window being listed
        window: Window,
        /// Error returned by the query service
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Graph store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
