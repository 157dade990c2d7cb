//! Diagnostic observer interface.
//!
//! Dependence analysis and scheduling report their decisions through a
//! [`HazardObserver`]. Observers are optional: every entry point has a variant
//! that uses [`NullObserver`], and none of them affect the computed result.

use crate::core::pipeline::hazards::{DataDependence, HazardEvaluation, StallEvent};

/// Receives diagnostic events from analysis and scheduling.
///
/// All methods default to doing nothing.
pub trait HazardObserver {
    /// A read-after-write dependence was recorded.
    fn on_dependence(&mut self, _dep: &DataDependence) {}

    /// A dependence was checked against the unstalled schedule.
    fn on_hazard_evaluated(&mut self, _eval: &HazardEvaluation) {}

    /// Bubbles were inserted in front of a consumer.
    fn on_stall(&mut self, _stall: &StallEvent) {}
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl HazardObserver for NullObserver {}

/// Forwards events to `tracing` at DEBUG level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceObserver;

impl HazardObserver for TraceObserver {
    fn on_dependence(&mut self, dep: &DataDependence) {
        tracing::debug!(
            producer = dep.producer,
            consumer = dep.consumer,
            slot = dep.operand_slot,
            available_stage = dep.available_stage,
            needed_stage = dep.needed_stage,
            "dependence recorded"
        );
    }

    fn on_hazard_evaluated(&mut self, eval: &HazardEvaluation) {
        tracing::debug!(
            producer = eval.producer,
            available = eval.available_cycle,
            consumer = eval.consumer,
            needed = eval.needed_cycle,
            stall = eval.stall,
            kept = eval.kept,
            "hazard evaluated"
        );
    }

    fn on_stall(&mut self, stall: &StallEvent) {
        tracing::debug!(
            producer = stall.producer,
            consumer = stall.consumer,
            cycles = stall.cycles,
            "stall inserted"
        );
    }
}

/// Keeps every event, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub dependences: Vec<DataDependence>,
    pub evaluations: Vec<HazardEvaluation>,
    pub stalls: Vec<StallEvent>,
}

impl HazardObserver for RecordingObserver {
    fn on_dependence(&mut self, dep: &DataDependence) {
        self.dependences.push(dep.clone());
    }

    fn on_hazard_evaluated(&mut self, eval: &HazardEvaluation) {
        self.evaluations.push(eval.clone());
    }

    fn on_stall(&mut self, stall: &StallEvent) {
        self.stalls.push(stall.clone());
    }
}
