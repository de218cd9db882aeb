//! Configuration for the Harvester

use patnet_domain::DEFAULT_STRIDE_DAYS;
use serde::{Deserialize, Serialize};

/// Configuration for the Harvester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Window length in days
    #[serde(default = "default_stride")]
    pub stride_days: u32,

    /// Continue from a matching checkpoint instead of starting over
    #[serde(default = "default_resume")]
    pub resume: bool,
}

fn default_stride() -> u32 {
    DEFAULT_STRIDE_DAYS
}

fn default_resume() -> bool {
    true
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            stride_days: default_stride(),
            resume: default_resume(),
        }
    }
}

impl HarvestConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.stride_days == 0 {
            return Err("stride_days must be greater than 0".to_string());
        }
        if self.stride_days > 366 {
            return Err("stride_days cannot exceed 366".to_string());
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
