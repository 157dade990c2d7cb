//! Pipeline Scheduler.
//!
//! Builds the cycle schedule for a sequence of instructions under one
//! [`PipelineMode`]:
//!
//! 1. Lay out the fully overlapped schedule.
//! 2. In the stalling modes, walk the dependences in consumer order and insert
//!    the distance-based number of bubbles after the consumer's Fetch, pushing
//!    every later instruction back by the same amount. Bubbles accumulate.
//! 3. Report the dependences that would stall an unstalled pipeline as hazards.
//!
//! The scheduler holds no state between calls.

use serde::Serialize;

use crate::core::pipeline::hazards::{self, DataDependence, HazardEvaluation, StallEvent};
use crate::core::pipeline::schedule::Schedule;
use crate::core::pipeline::traits::{HazardObserver, NullObserver};
use crate::core::pipeline::{PipelineMode, Stage};

/// Result of one scheduling run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    pub mode: PipelineMode,
    /// Fully overlapped schedule before any bubble.
    pub naive: Schedule,
    /// Final schedule; equal to `naive` in the display-only mode.
    pub schedule: Schedule,
    /// Dependences that are real hazards, in discovery order.
    pub hazards: Vec<DataDependence>,
    /// Bubbles inserted, in the order they were applied.
    pub stalls: Vec<StallEvent>,
    /// Instructions left out because they fall past the display window.
    pub truncated: usize,
}

impl ScheduleResult {
    /// Total bubble cycles inserted.
    pub fn stall_cycles(&self) -> u64 {
        self.stalls.iter().map(|s| s.cycles).sum()
    }
}

/// Computes cycle schedules, optionally bounded to a display window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineScheduler {
    capacity: Option<usize>,
}

impl Default for PipelineScheduler {
    fn default() -> Self {
        Self::new(Some(Self::DEFAULT_CAPACITY))
    }
}

impl PipelineScheduler {
    /// Rows in the classic fixed display window.
    pub const DEFAULT_CAPACITY: usize = 7;

    /// Creates a scheduler that keeps at most `capacity` instructions.
    /// `None` schedules every instruction.
    pub fn new(capacity: Option<usize>) -> Self {
        Self { capacity }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Schedules `instruction_count` instructions.
    ///
    /// # Arguments
    ///
    /// * `instruction_count` - Number of valid instructions
    /// * `deps` - Dependences as returned by [`hazards::analyze`] for `mode`
    /// * `mode` - Hazard handling policy
    pub fn schedule(
        &self,
        instruction_count: usize,
        deps: &[DataDependence],
        mode: PipelineMode,
    ) -> ScheduleResult {
        self.schedule_with(instruction_count, deps, mode, &mut NullObserver)
    }

    /// Same as [`schedule`](Self::schedule), reporting each decision to
    /// `observer`.
    pub fn schedule_with(
        &self,
        instruction_count: usize,
        deps: &[DataDependence],
        mode: PipelineMode,
        observer: &mut dyn HazardObserver,
    ) -> ScheduleResult {
        let scheduled = self
            .capacity
            .map_or(instruction_count, |cap| instruction_count.min(cap));
        let naive = Schedule::naive(scheduled);

        let hazards = filter_hazards(deps, mode, &naive, observer);

        let mut schedule = naive.clone();
        let mut stalls = Vec::new();
        if mode.inserts_stalls() {
            let mut ordered: Vec<&DataDependence> = deps.iter().collect();
            ordered.sort_by_key(|d| d.consumer);

            for dep in ordered {
                if dep.is_store_sourced() || schedule.row(dep.consumer).is_none() {
                    continue;
                }
                let cycles = hazards::stall_for_distance(mode, dep.distance());
                if cycles == 0 {
                    continue;
                }
                schedule = schedule.with_stall(dep.consumer, cycles);
                let event = StallEvent {
                    producer: dep.producer,
                    consumer: dep.consumer,
                    cycles,
                };
                observer.on_stall(&event);
                stalls.push(event);
            }
        }

        ScheduleResult {
            mode,
            naive,
            schedule,
            hazards,
            stalls,
            truncated: instruction_count - scheduled,
        }
    }
}

/// Keeps the dependences that would stall `naive`, dropping store-sourced
/// edges and edges that reach outside the schedule.
fn filter_hazards(
    deps: &[DataDependence],
    mode: PipelineMode,
    naive: &Schedule,
    observer: &mut dyn HazardObserver,
) -> Vec<DataDependence> {
    let cycle_of = |number: usize, stage: Option<Stage>| -> u64 {
        stage.map_or(0, |s| naive.cycle(number, s))
    };

    let mut kept = Vec::new();
    for dep in deps {
        let in_window = naive.row(dep.producer).is_some() && naive.row(dep.consumer).is_some();
        let stall = if dep.is_store_sourced() {
            0
        } else {
            hazards::conflict_cycles(mode, dep.distance())
        };
        let eval = HazardEvaluation {
            producer: dep.producer,
            consumer: dep.consumer,
            operand_slot: dep.operand_slot,
            available_cycle: cycle_of(dep.producer, dep.available()),
            needed_cycle: cycle_of(dep.consumer, dep.needed()),
            stall,
            kept: in_window && stall > 0,
        };
        observer.on_hazard_evaluated(&eval);
        if eval.kept {
            kept.push(dep.clone());
        }
    }
    kept
}
