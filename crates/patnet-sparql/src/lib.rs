//! Patnet Linked-Data Layer
//!
//! Implementations of the `QueryService` and `NameService` traits from
//! `patnet-domain`.
//!
//! # Services
//!
//! - `LinkedDataClient`: SPARQL endpoint and entity documents over HTTP
//! - `MockQueryService` / `MockNameService`: deterministic in-memory doubles
//!
//! # Examples
//!
//! ```
//! use patnet_sparql::MockNameService;
//! use patnet_domain::traits::NameService;
//!
//! let names = MockNameService::new();
//! names.add_name("http://id/1", "ACME CO.,");
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let resolved = runtime.block_on(names.resolve("http://id/1")).unwrap();
//! assert_eq!(resolved.as_deref(), Some("ACME CO.,"));
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod query;
pub mod response;

pub use client::LinkedDataClient;
pub use config::ClientConfig;

use patnet_domain::traits::{NameService, QueryService};
use patnet_domain::{Authority, PublicationId, PublicationRecord, Window};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors that can occur while talking to the linked-data service
#[derive(Error, Debug)]
pub enum SparqlError {
    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Unexpected HTTP status
    #[error("HTTP {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Response excerpt or URL
        message: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Identifier cannot be embedded in a query
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure injected by a mock
    #[error("Mock failure: {0}")]
    Mock(String),
}

/// In-memory query service for deterministic testing
///
/// Listings are keyed by window, records by publication URI. Unknown
/// windows list nothing, unknown publications return an empty record.
/// Clones share state, so a test can keep a handle to inspect call counts.
#[derive(Debug, Clone, Default)]
pub struct MockQueryService {
    listings: Arc<Mutex<HashMap<Window, Vec<PublicationId>>>>,
    records: Arc<Mutex<HashMap<String, PublicationRecord>>>,
    failing_windows: Arc<Mutex<HashSet<Window>>>,
    failing_records: Arc<Mutex<HashSet<String>>>,
    listed: Arc<Mutex<Vec<Window>>>,
    fetch_count: Arc<Mutex<usize>>,
}

impl MockQueryService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Publications listed for `window`
    pub fn add_listing(&self, window: Window, publications: Vec<PublicationId>) {
        self.listings.lock().unwrap().insert(window, publications);
    }

    /// Record returned for `publication`
    pub fn add_record(&self, publication: &PublicationId, record: PublicationRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(publication.as_str().to_string(), record);
    }

    /// Make listing `window` fail
    pub fn fail_listing(&self, window: Window) {
        self.failing_windows.lock().unwrap().insert(window);
    }

    /// Make fetching `publication` fail
    pub fn fail_record(&self, publication: &PublicationId) {
        self.failing_records
            .lock()
            .unwrap()
            .insert(publication.as_str().to_string());
    }

    /// Windows listed so far, in call order
    pub fn listed_windows(&self) -> Vec<Window> {
        self.listed.lock().unwrap().clone()
    }

    /// Number of record fetches so far
    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap()
    }
}

impl QueryService for MockQueryService {
    type Error = SparqlError;

    async fn list_publications(
        &self,
        window: &Window,
        _authority: &Authority,
    ) -> Result<Vec<PublicationId>, Self::Error> {
        self.listed.lock().unwrap().push(*window);
        if self.failing_windows.lock().unwrap().contains(window) {
            return Err(SparqlError::Mock(format!("listing {} failed", window)));
        }
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(window)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_record(&self, publication: &PublicationId) -> Result<PublicationRecord, Self::Error> {
        *self.fetch_count.lock().unwrap() += 1;
        if self.failing_records.lock().unwrap().contains(publication.as_str()) {
            return Err(SparqlError::Mock(format!("fetching {} failed", publication)));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(publication.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

/// In-memory name service for deterministic testing
///
/// Unknown identifiers resolve to `None`.
#[derive(Debug, Clone, Default)]
pub struct MockNameService {
    names: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockNameService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name returned for `identifier`
    pub fn add_name(&self, identifier: impl Into<String>, name: impl Into<String>) {
        self.names.lock().unwrap().insert(identifier.into(), name.into());
    }

    /// Make resolving `identifier` fail
    pub fn add_error(&self, identifier: impl Into<String>) {
        self.failing.lock().unwrap().insert(identifier.into());
    }

    /// Number of resolve calls so far
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl NameService for MockNameService {
    type Error = SparqlError;

    async fn resolve(&self, identifier: &str) -> Result<Option<String>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        if self.failing.lock().unwrap().contains(identifier) {
            return Err(SparqlError::Mock(format!("resolving {} failed", identifier)));
        }
        Ok(self.names.lock().unwrap().get(identifier).cloned())
    }
}
