//! End-to-end analysis: text in, schedule and hazards out.

use serde::Serialize;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::hazards::{self, DataDependence};
use crate::core::pipeline::traits::HazardObserver;
use crate::core::pipeline::PipelineMode;
use crate::core::scheduler::ScheduleResult;
use crate::isa::{parse_program, Program};
use crate::stats::ScheduleStats;

/// Everything computed for one instruction sequence under one mode.
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub program: Program,
    /// Every recorded dependence, including store-sourced ones.
    pub dependences: Vec<DataDependence>,
    pub result: ScheduleResult,
    pub stats: ScheduleStats,
}

impl Analysis {
    pub fn mode(&self) -> PipelineMode {
        self.result.mode
    }

    pub fn hazards(&self) -> &[DataDependence] {
        &self.result.hazards
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parses `text`, finds its dependences and schedules it under `mode`.
///
/// The display window comes from `config.pipeline`; `config.pipeline.mode` is
/// ignored in favour of `mode`.
///
/// # Examples
///
/// ```
/// use pipeline_hazards::config::Config;
/// use pipeline_hazards::core::pipeline::traits::NullObserver;
/// use pipeline_hazards::core::PipelineMode;
/// use pipeline_hazards::sim::analyze_program;
///
/// let text = "add $1,$2,$3\nadd $4,$1,$5\n";
/// let a = analyze_program(text, PipelineMode::Forwarding, &Config::default(), &mut NullObserver);
/// assert_eq!(a.result.schedule.rows()[1], [2, 4, 5, 6, 7]);
/// ```
pub fn analyze_program(
    text: &str,
    mode: PipelineMode,
    config: &Config,
    observer: &mut dyn HazardObserver,
) -> Analysis {
    let program = parse_program(text);
    let dependences = hazards::analyze_with(&program.instructions, mode, observer);
    let result =
        config
            .pipeline
            .scheduler()
            .schedule_with(program.len(), &dependences, mode, observer);
    let stats = ScheduleStats::collect(&result, dependences.len());

    Analysis {
        program,
        dependences,
        result,
        stats,
    }
}
