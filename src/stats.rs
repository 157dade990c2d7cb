//! Schedule statistics collection and reporting.
//!
//! Summarises a scheduling run: cycle counts, inserted bubbles, hazards and
//! cycles per instruction.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::PipelineMode;
use crate::core::scheduler::ScheduleResult;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleStats {
    pub mode: PipelineMode,
    pub instructions: usize,
    /// Cycle in which the last instruction writes back.
    pub cycles: u64,
    /// Cycles the same instructions take with no bubbles.
    pub ideal_cycles: u64,
    pub stall_cycles: u64,
    pub dependences: usize,
    pub hazards: usize,
    pub truncated: usize,
}

impl ScheduleStats {
    /// Collects statistics from a scheduling run over `dependences` edges.
    pub fn collect(result: &ScheduleResult, dependences: usize) -> Self {
        Self {
            mode: result.mode,
            instructions: result.schedule.len(),
            cycles: result.schedule.total_cycles(),
            ideal_cycles: result.naive.total_cycles(),
            stall_cycles: result.stall_cycles(),
            dependences,
            hazards: result.hazards.len(),
            truncated: result.truncated,
        }
    }

    /// Cycles per instruction, including pipeline fill. 0 for an empty run.
    pub fn cpi(&self) -> f64 {
        if self.instructions == 0 {
            return 0.0;
        }
        self.cycles as f64 / self.instructions as f64
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for ScheduleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slowdown = if self.ideal_cycles == 0 {
            0.0
        } else {
            (self.cycles as f64 / self.ideal_cycles as f64 - 1.0) * 100.0
        };

        writeln!(f, "==========================================================")?;
        writeln!(f, "PIPELINE SCHEDULE STATISTICS ({})", self.mode)?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sched_insts              {}", self.instructions)?;
        writeln!(f, "sched_cycles             {}", self.cycles)?;
        writeln!(f, "sched_cpi                {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "  cycles.ideal           {}", self.ideal_cycles)?;
        writeln!(
            f,
            "  stalls.data            {} (+{:.2}%)",
            self.stall_cycles, slowdown
        )?;
        writeln!(f, "  deps.raw               {}", self.dependences)?;
        writeln!(f, "  deps.hazards           {}", self.hazards)?;
        if self.truncated > 0 {
            writeln!(f, "  insts.truncated        {}", self.truncated)?;
        }
        write!(f, "==========================================================")
    }
}
