//! Configuration for the generation pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum input length in characters (story text or extracted document text)
    pub max_input_chars: usize,

    /// Maximum time for a single provider round trip (seconds)
    pub ai_timeout_secs: u64,
}

impl PipelineConfig {
    /// Get the provider timeout as a Duration
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        if self.ai_timeout_secs == 0 {
            return Err("ai_timeout_secs must be greater than 0".to_string());
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

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 200_000,
            ai_timeout_secs: 120,
        }
    }
}
