//! Configuration for the graph store

use crate::graph::DEFAULT_GRAPH_NAME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the graph and its progress marker live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// File the serializer writes (with rendering artifacts)
    #[serde(default = "default_raw_path")]
    pub raw_path: PathBuf,

    /// Cleaned copy; reloaded at the start of every window
    #[serde(default = "default_cleaned_path")]
    pub cleaned_path: PathBuf,

    /// Progress marker written after each window
    #[serde(default = "default_checkpoint_path")]
    pub checkpoint_path: PathBuf,

    /// Name given to a new graph
    #[serde(default = "default_graph_name")]
    pub graph_name: String,
}

fn default_raw_path() -> PathBuf {
    PathBuf::from("data/epo_collaboration_graph.net")
}

fn default_cleaned_path() -> PathBuf {
    PathBuf::from("data/correct_epo_collaboration_graph.net")
}

fn default_checkpoint_path() -> PathBuf {
    PathBuf::from("data/epo_collaboration_graph.progress.json")
}

fn default_graph_name() -> String {
    DEFAULT_GRAPH_NAME.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            raw_path: default_raw_path(),
            cleaned_path: default_cleaned_path(),
            checkpoint_path: default_checkpoint_path(),
            graph_name: default_graph_name(),
        }
    }
}

impl StoreConfig {
    /// All files under one directory, keeping the default file names
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            raw_path: dir.join("epo_collaboration_graph.net"),
            cleaned_path: dir.join("correct_epo_collaboration_graph.net"),
            checkpoint_path: dir.join("epo_collaboration_graph.progress.json"),
            graph_name: default_graph_name(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.raw_path.as_os_str().is_empty() {
            return Err("raw_path cannot be empty".to_string());
        }
        if self.cleaned_path.as_os_str().is_empty() {
            return Err("cleaned_path cannot be empty".to_string());
        }
        if self.raw_path == self.cleaned_path {
            return Err("raw_path and cleaned_path must differ".to_string());
        }
        if self.checkpoint_path == self.raw_path || self.checkpoint_path == self.cleaned_path {
            return Err("checkpoint_path must differ from the graph files".to_string());
        }
        if self.graph_name.contains('\n') {
            return Err("graph_name must be a single line".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StoreConfig::default().validate().is_ok());
        assert!(StoreConfig::in_dir("/tmp/patnet").validate().is_ok());
    }

    #[test]
    fn test_same_paths_rejected() {
        let mut config = StoreConfig::default();
        config.cleaned_path = config.raw_path.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = StoreConfig::from_toml("graph_name = \"Test Graph\"").unwrap();
        assert_eq!(config.graph_name, "Test Graph");
        assert_eq!(config.raw_path, default_raw_path());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = StoreConfig::in_dir("out");
        let parsed = StoreConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
