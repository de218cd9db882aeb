//! Patnet Domain Layer
//!
//! Core vocabulary for building patent co-applicant collaboration networks.
//! It keeps external dependencies to calendar dates and serde derives, and
//! defines the value objects and trait interfaces the other crates depend on.
//!
//! ## Key Concepts
//!
//! - **Window**: A bounded filing-date range `[start, end)` queried at once
//! - **Authority**: The filing office whose applications are considered
//! - **Publication Record**: Raw `(title, value)` field pairs of one publication
//! - **Entity**: A canonical company name, identified by exact string equality
//! - **Category**: The classification label carried by collaboration edges
//!
//! ## Architecture
//!
//! - Pure business logic only (window scheduling, run validation)
//! - Trait definitions for the remote query and entity name services
//! - Progress events consumed by whatever front end drives a run

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod authority;
pub mod collaboration;
pub mod progress;
pub mod record;
pub mod run;
pub mod traits;
pub mod window;

// Re-exports for convenience
pub use authority::Authority;
pub use collaboration::{Category, Entity};
pub use progress::{NoopObserver, ProgressEvent, ProgressObserver};
pub use record::{FieldPair, PublicationId, PublicationRecord};
pub use run::RunConfig;
pub use window::{Window, WindowScheduler, DEFAULT_STRIDE_DAYS};
