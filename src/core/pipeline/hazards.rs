//! Data Hazard Detection.
//!
//! This module finds read-after-write (RAW) dependences between instructions
//! and decides how many bubble cycles each one costs under a given
//! [`PipelineMode`].
//!
//! Stall amounts depend only on the instruction distance between producer and
//! consumer:
//!
//! | mode          | distance 1 | distance 2 | distance ≥ 3 |
//! |---------------|------------|------------|--------------|
//! | no forwarding | 2          | 1          | 0            |
//! | forwarding    | 1          | 0          | 0            |
//!
//! Bubbles from different dependences add up, including when two producers
//! feed the same consumer.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::traits::{HazardObserver, NullObserver};
use crate::core::pipeline::{PipelineMode, Stage};
use crate::isa::{Instruction, InstructionKind};

/// Decode-to-Decode distance needed without forwarding.
///
/// The consumer reads the register file in Decode, which must not come
/// before the producer's Writeback (write in the first half cycle, read in
/// the second).
const NO_FORWARDING_GAP: u64 = 3;

/// Decode-to-Decode distance needed with a forwarding unit.
const FORWARDING_GAP: u64 = 2;

/// A read-after-write edge between two instructions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataDependence {
    /// Number of the instruction that writes the value.
    pub producer: usize,
    /// Number of the instruction that reads it.
    pub consumer: usize,
    /// Which source operand of the consumer is satisfied (1 or 2).
    pub operand_slot: u8,
    pub producer_kind: InstructionKind,
    pub consumer_kind: InstructionKind,
    /// Stage (1-5) after whose completion the value exists; 0 for stores.
    pub available_stage: u8,
    /// Stage (1-5) at whose start the value must be present; 0 for stores.
    pub needed_stage: u8,
}

impl DataDependence {
    /// Difference between consumer and producer instruction numbers.
    pub fn distance(&self) -> usize {
        self.consumer - self.producer
    }

    /// Stores define no register value, so these edges are never hazards.
    pub fn is_store_sourced(&self) -> bool {
        self.producer_kind == InstructionKind::Store
    }

    pub fn available(&self) -> Option<Stage> {
        Stage::from_number(self.available_stage)
    }

    pub fn needed(&self) -> Option<Stage> {
        Stage::from_number(self.needed_stage)
    }
}

impl fmt::Display for DataDependence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "I{} ({}) -> I{} ({}) src{}",
            self.producer, self.producer_kind, self.consumer, self.consumer_kind, self.operand_slot
        )?;
        match (self.available(), self.needed()) {
            (Some(a), Some(n)) => write!(f, ", available after {}, needed at {}", a, n),
            _ => write!(f, ", no register value"),
        }
    }
}

/// Outcome of checking one dependence against the unstalled schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HazardEvaluation {
    pub producer: usize,
    pub consumer: usize,
    pub operand_slot: u8,
    /// Cycle of the producer's available stage, 0 if not applicable.
    pub available_cycle: u64,
    /// Cycle of the consumer's needed stage, 0 if not applicable.
    pub needed_cycle: u64,
    /// Bubbles this dependence would need on its own.
    pub stall: u64,
    /// Whether it is reported as a real hazard.
    pub kept: bool,
}

/// A bubble inserted in front of a consumer's Decode stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StallEvent {
    pub producer: usize,
    pub consumer: usize,
    pub cycles: u64,
}

/// Returns `(available_stage, needed_stage)` for a dependence.
pub fn stage_timing(mode: PipelineMode, producer: InstructionKind) -> (u8, u8) {
    match (mode, producer) {
        (_, InstructionKind::Store) => (0, 0),
        (PipelineMode::Forwarding, InstructionKind::Load) => {
            (Stage::Memory.number(), Stage::Execute.number())
        }
        (PipelineMode::Forwarding, _) => (Stage::Execute.number(), Stage::Execute.number()),
        (PipelineMode::Hazards | PipelineMode::NoForwarding, _) => {
            (Stage::Writeback.number(), Stage::Decode.number())
        }
    }
}

/// Required Decode-to-Decode separation for the stage timing of `mode`.
///
/// The display-only mode shares the no-forwarding timing.
fn decode_gap(mode: PipelineMode) -> u64 {
    match mode {
        PipelineMode::Hazards | PipelineMode::NoForwarding => NO_FORWARDING_GAP,
        PipelineMode::Forwarding => FORWARDING_GAP,
    }
}

/// Bubbles the stage timing of `mode` needs for a dependence at `distance`,
/// whether or not the mode actually inserts them.
///
/// Used to decide which dependences are real hazards. In the display-only
/// mode this is what the no-forwarding pipeline would need.
pub fn conflict_cycles(mode: PipelineMode, distance: usize) -> u64 {
    decode_gap(mode).saturating_sub(distance as u64)
}

/// Stall cycles inserted for a dependence at `distance`. Always 0 in the
/// display-only mode.
pub fn stall_for_distance(mode: PipelineMode, distance: usize) -> u64 {
    if !mode.inserts_stalls() {
        return 0;
    }
    conflict_cycles(mode, distance)
}

/// Finds every read-after-write dependence in `instructions`.
///
/// See [`analyze_with`].
pub fn analyze(instructions: &[Instruction], mode: PipelineMode) -> Vec<DataDependence> {
    analyze_with(instructions, mode, &mut NullObserver)
}

/// Finds every read-after-write dependence, reporting each to `observer`.
///
/// For each instruction, earlier instructions are scanned nearest first; each
/// source operand takes the first writer found and stops searching. The
/// result is ordered by consumer, then by discovery.
pub fn analyze_with(
    instructions: &[Instruction],
    mode: PipelineMode,
    observer: &mut dyn HazardObserver,
) -> Vec<DataDependence> {
    let mut deps = Vec::new();

    for (idx, consumer) in instructions.iter().enumerate() {
        if !consumer.is_valid() {
            continue;
        }
        let mut found = [false; 2];

        for producer in instructions[..idx].iter().rev() {
            if found.iter().all(|f| *f) {
                break;
            }
            let Some(dest) = producer.destination() else {
                continue;
            };

            for slot in 1..=2u8 {
                let done = &mut found[slot as usize - 1];
                if *done || consumer.source(slot) != Some(dest) {
                    continue;
                }
                *done = true;

                let (available_stage, needed_stage) = stage_timing(mode, producer.kind);
                let dep = DataDependence {
                    producer: producer.number,
                    consumer: consumer.number,
                    operand_slot: slot,
                    producer_kind: producer.kind,
                    consumer_kind: consumer.kind,
                    available_stage,
                    needed_stage,
                };
                observer.on_dependence(&dep);
                deps.push(dep);
            }
        }
    }

    deps
}
