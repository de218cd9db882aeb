//! Patnet Harvester
//!
//! Turns patent publications into a co-applicant collaboration graph.
//!
//! # Architecture
//!
//! ```text
//! RunConfig → windows → QueryService → extract → NameService → normalize
//!           → category → CollaborationGraph → GraphStore (+ checkpoint)
//! ```
//!
//! # Key Features
//!
//! - **Windowed runs**: a date range is processed in fixed-stride windows,
//!   each persisted before the next one starts
//! - **Canonical names**: ordered literal rules fold legal-form spellings
//! - **Representative category**: most frequent class symbol, first seen wins ties
//! - **Resumable**: a checkpoint after every window lets a rerun skip finished work
//! - **Tolerant**: a broken publication is skipped and counted, never fatal
//!
//! # Example Usage
//!
//! ```no_run
//! use patnet_domain::{Authority, RunConfig};
//! use patnet_harvester::{HarvestConfig, Harvester};
//! use patnet_sparql::{MockNameService, MockQueryService};
//! use patnet_store::{GraphStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let run = RunConfig::new(
//!     chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!     chrono::NaiveDate::from_ymd_opt(2023, 1, 8).unwrap(),
//!     Authority::european(),
//! )?;
//! let mut harvester = Harvester::new(
//!     MockQueryService::new(),
//!     MockNameService::new(),
//!     GraphStore::new(StoreConfig::in_dir("data")),
//!     HarvestConfig::default(),
//! );
//!
//! let mut log = |event: &patnet_domain::ProgressEvent| println!("{:?}", event);
//! let report = harvester.run(&run, &mut log).await?;
//! println!("{} nodes, {} edges", report.nodes, report.edges);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod harvester;
mod metrics;

pub mod category;
pub mod extract;
pub mod normalize;
pub mod resolver;


pub use config::HarvestConfig;
pub use error::HarvesterError;
pub use harvester::{HarvestReport, Harvester, PublicationOutcome};
pub use metrics::HarvestMetrics;
