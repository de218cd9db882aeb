//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the harvesting pipeline and the
//! remote services it consumes. Implementations live in other crates.

use crate::{Authority, PublicationId, PublicationRecord, Window};

/// Lists publications and fetches their raw attributes
///
/// Implemented by the infrastructure layer (patnet-sparql)
#[allow(async_fn_in_trait)]
pub trait QueryService {
    /// Error type for query operations
    type Error;

    /// List publications of applications filed in `window` at `authority`
    ///
    /// The order is the service's order and may be empty. A failure here
    /// aborts the whole run.
    async fn list_publications(
        &self,
        window: &Window,
        authority: &Authority,
    ) -> Result<Vec<PublicationId>, Self::Error>;

    /// Fetch the raw attribute pairs of one publication
    ///
    /// A failure here only affects this publication.
    async fn fetch_record(&self, publication: &PublicationId) -> Result<PublicationRecord, Self::Error>;
}

/// Resolves co-applicant identifiers to display names
///
/// Implemented by the infrastructure layer (patnet-sparql)
#[allow(async_fn_in_trait)]
pub trait NameService {
    /// Error type for resolution
    type Error;

    /// Resolve an identifier; `Ok(None)` when the service has no name for it
    async fn resolve(&self, identifier: &str) -> Result<Option<String>, Self::Error>;
}
