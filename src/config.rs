//! Configuration loading.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields [`Config::default`].
//!
//! ```toml
//! [general]
//! trace = false
//!
//! [pipeline]
//! mode = "forwarding"
//! capacity = 7   # 0 schedules every instruction
//! ```

use std::fs;

use serde::Deserialize;

use crate::common::error::SimError;
use crate::core::pipeline::PipelineMode;
use crate::core::scheduler::PipelineScheduler;

const DEFAULT_CAPACITY: usize = PipelineScheduler::DEFAULT_CAPACITY;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: &str) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Whether hazard diagnostics should be traced.
    pub fn trace_enabled(&self) -> bool {
        cfg!(feature = "always-trace") || self.general.trace
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit hazard diagnostics through `tracing`.
    #[serde(default)]
    pub trace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub mode: PipelineMode,

    /// Display window size; 0 means unbounded.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            capacity: default_capacity(),
        }
    }
}

impl PipelineConfig {
    /// Display window as the scheduler expects it.
    pub fn capacity_val(&self) -> Option<usize> {
        match self.capacity {
            0 => None,
            n => Some(n),
        }
    }

    pub fn scheduler(&self) -> PipelineScheduler {
        PipelineScheduler::new(self.capacity_val())
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
