//! Five-stage instruction pipeline model.
//!
//! This module contains the stage and mode definitions, read-after-write
//! dependence analysis, the cycle schedule, and the observer interface used to
//! report hazard decisions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::SimError;

/// Read-after-write dependence analysis and stall rules.
pub mod hazards;

/// Per-instruction stage cycle table.
pub mod schedule;

/// Diagnostic observer interface.
pub mod traits;

/// Number of pipeline stages.
pub const NUM_STAGES: usize = 5;

/// A pipeline stage, numbered 1 (Fetch) through 5 (Writeback).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    /// Instruction fetch.
    Fetch = 1,
    /// Decode and register read.
    Decode = 2,
    /// ALU operation or address calculation.
    Execute = 3,
    /// Data memory access.
    Memory = 4,
    /// Register writeback.
    Writeback = 5,
}

impl Stage {
    pub const ALL: [Stage; NUM_STAGES] = [
        Stage::Fetch,
        Stage::Decode,
        Stage::Execute,
        Stage::Memory,
        Stage::Writeback,
    ];

    /// 1-based stage number.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// 0-based column index in a schedule row.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    /// Short label used in pipeline diagrams.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Stage::Fetch => "IF",
            Stage::Decode => "ID",
            Stage::Execute => "EX",
            Stage::Memory => "MEM",
            Stage::Writeback => "WB",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Hazard handling policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineMode {
    /// Fully overlapped issue; hazards are reported but never resolved.
    #[default]
    #[serde(alias = "display-hazards")]
    Hazards,
    /// Stall until the producer has written back.
    NoForwarding,
    /// Stall until the producer's result can be forwarded into Execute.
    Forwarding,
}

impl PipelineMode {
    pub const ALL: [PipelineMode; 3] = [
        PipelineMode::Hazards,
        PipelineMode::NoForwarding,
        PipelineMode::Forwarding,
    ];

    /// Whether this mode inserts bubbles into the schedule.
    pub fn inserts_stalls(self) -> bool {
        !matches!(self, PipelineMode::Hazards)
    }

    pub fn name(self) -> &'static str {
        match self {
            PipelineMode::Hazards => "hazards",
            PipelineMode::NoForwarding => "no-forwarding",
            PipelineMode::Forwarding => "forwarding",
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipelineMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hazards" | "display-hazards" | "display" => Ok(PipelineMode::Hazards),
            "no-forwarding" | "noforwarding" | "stall" => Ok(PipelineMode::NoForwarding),
            "forwarding" | "forward" => Ok(PipelineMode::Forwarding),
            _ => Err(SimError::InvalidMode(s.to_string())),
        }
    }
}

pub use hazards::DataDependence;
pub use schedule::Schedule;
pub use traits::HazardObserver;
