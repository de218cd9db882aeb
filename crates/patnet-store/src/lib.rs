//! Patnet Storage Layer
//!
//! Holds the collaboration multigraph in memory and persists it as Pajek text.
//!
//! # Architecture
//!
//! - [`CollaborationGraph`]: petgraph-backed undirected multigraph
//! - [`pajek`]: text interchange format (nodes enumerated, then labeled edges)
//! - [`clean`]: strips the serializer's rendering artifact into a cleaned copy
//! - [`Checkpoint`]: progress marker written after every persisted window
//!
//! The cleaned copy, not the raw file, is what [`GraphStore::load`] reads.
//!
//! # Examples
//!
//! ```no_run
//! use patnet_store::{GraphStore, StoreConfig};
//!
//! let store = GraphStore::new(StoreConfig::default());
//! let graph = store.load().unwrap();
//! let saved_to = store.persist(&graph).unwrap();
//! println!("{} nodes saved to {}", graph.node_count(), saved_to.display());
//! ```

#![warn(missing_docs)]

pub mod checkpoint;
pub mod clean;
pub mod config;
pub mod graph;
pub mod pajek;

pub use checkpoint::Checkpoint;
pub use config::StoreConfig;
pub use graph::CollaborationGraph;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Checkpoint (de)serialization error
    #[error("Checkpoint format error: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph file could not be parsed
    #[error("Invalid graph file: {0}")]
    InvalidData(String),

    /// Invalid store configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// File-backed store for the collaboration graph
pub struct GraphStore {
    config: StoreConfig,
}

impl GraphStore {
    /// Create a store over the configured paths
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Create a store after validating its configuration
    pub fn validated(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate().map_err(StoreError::Config)?;
        Ok(Self::new(config))
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the cleaned graph file
    pub fn cleaned_path(&self) -> &Path {
        &self.config.cleaned_path
    }

    /// Load the cleaned graph, or an empty one if nothing was saved yet
    pub fn load(&self) -> Result<CollaborationGraph, StoreError> {
        load_from(&self.config.cleaned_path, &self.config.graph_name)
    }

    /// Save the raw file, then write the cleaned copy
    ///
    /// Returns the cleaned path, which is the artifact to report.
    pub fn persist(&self, graph: &CollaborationGraph) -> Result<PathBuf, StoreError> {
        save(graph, &self.config.raw_path)?;
        clean::clean_file(&self.config.raw_path, &self.config.cleaned_path)?;
        debug!(
            "Persisted graph '{}' ({} nodes, {} edges) to {}",
            graph.name(),
            graph.node_count(),
            graph.edge_count(),
            self.config.cleaned_path.display()
        );
        Ok(self.config.cleaned_path.clone())
    }

    /// Read the progress marker, if any
    pub fn read_checkpoint(&self) -> Result<Option<Checkpoint>, StoreError> {
        Checkpoint::read(&self.config.checkpoint_path)
    }

    /// Write the progress marker
    pub fn write_checkpoint(&self, checkpoint: &Checkpoint) -> Result<(), StoreError> {
        checkpoint.write(&self.config.checkpoint_path)
    }
}

/// Parse a graph file; a missing file yields an empty graph named `default_name`
pub fn load_from(path: &Path, default_name: &str) -> Result<CollaborationGraph, StoreError> {
    if !path.exists() {
        debug!("No graph at {}, starting empty", path.display());
        return Ok(CollaborationGraph::new(default_name));
    }
    let text = fs::read_to_string(path)?;
    pajek::from_pajek(&text, default_name)
}

/// Serialize a graph to `path`, creating parent directories
///
/// The text goes to a sibling temporary file that is then renamed over
/// `path`, so readers see either the previous file or the complete new one.
pub fn save(graph: &CollaborationGraph, path: &Path) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let tmp = temp_sibling(path);
    fs::write(&tmp, pajek::to_pajek(graph))?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// `<file name>.tmp` next to `path`
pub(crate) fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
