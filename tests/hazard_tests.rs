//! Tests for read-after-write dependence analysis.

use pipeline_hazards::core::pipeline::hazards::{self, DataDependence};
use pipeline_hazards::core::pipeline::traits::RecordingObserver;
use pipeline_hazards::core::pipeline::PipelineMode;
use pipeline_hazards::isa::{parse_program, InstructionKind};

/// Textbook sequence with load-use, ALU and store-data dependences.
const SEQUENCE: &str = "lw $2, 20($1)
add $4, $2, $5
sub $8, $2, $6
add $9, $4, $2
sw $9, 12($3)";

fn deps_of(text: &str, mode: PipelineMode) -> Vec<DataDependence> {
    hazards::analyze(&parse_program(text).instructions, mode)
}

fn edges(deps: &[DataDependence]) -> Vec<(usize, usize, u8)> {
    deps.iter()
        .map(|d| (d.producer, d.consumer, d.operand_slot))
        .collect()
}

/// Tests the single adjacent dependence from the worked example.
#[test]
fn test_adjacent_add_forwarding() {
    let deps = deps_of("add $1,$2,$3\nadd $4,$1,$5", PipelineMode::Forwarding);
    assert_eq!(
        deps,
        vec![DataDependence {
            producer: 1,
            consumer: 2,
            operand_slot: 1,
            producer_kind: InstructionKind::Add,
            consumer_kind: InstructionKind::Add,
            available_stage: 3,
            needed_stage: 3,
        }]
    );
    assert_eq!(deps[0].distance(), 1);
}

/// Tests discovery order: by consumer, nearest producer first.
#[test]
fn test_discovery_order() {
    let deps = deps_of(SEQUENCE, PipelineMode::NoForwarding);
    assert_eq!(
        edges(&deps),
        vec![(1, 2, 1), (1, 3, 1), (2, 4, 1), (1, 4, 2), (4, 5, 1)]
    );
}

/// Tests stage timing in each mode.
#[test]
fn test_stage_timing_by_mode() {
    for mode in [PipelineMode::Hazards, PipelineMode::NoForwarding] {
        for dep in deps_of(SEQUENCE, mode) {
            assert_eq!((dep.available_stage, dep.needed_stage), (5, 2));
        }
    }

    let fwd = deps_of(SEQUENCE, PipelineMode::Forwarding);
    // I1 is a load, I2 and I4 are ALU ops.
    assert_eq!((fwd[0].available_stage, fwd[0].needed_stage), (4, 3));
    assert_eq!((fwd[2].available_stage, fwd[2].needed_stage), (3, 3));
    assert_eq!((fwd[4].available_stage, fwd[4].needed_stage), (3, 3));
    assert_eq!(fwd[4].consumer_kind, InstructionKind::Store);
}

/// Tests that only the most recent writer of a register is recorded.
#[test]
fn test_nearest_writer_wins() {
    let deps = deps_of(
        "add $1,$2,$3\nsub $1,$4,$5\nadd $6,$1,$1",
        PipelineMode::NoForwarding,
    );
    assert_eq!(edges(&deps), vec![(2, 3, 1), (2, 3, 2)]);
}

/// Tests that the two source slots resolve to different producers independently.
#[test]
fn test_independent_slots() {
    let deps = deps_of(
        "add $1,$2,$3\nadd $5,$6,$7\nadd $4,$1,$5",
        PipelineMode::NoForwarding,
    );
    assert_eq!(edges(&deps), vec![(2, 3, 2), (1, 3, 1)]);
}

/// Tests that a store feeding a load of the same word is recorded but inert.
#[test]
fn test_store_sourced_dependence() {
    for mode in PipelineMode::ALL {
        let deps = deps_of("sw $1, 0($2)\nlw $3, 0($2)", mode);
        assert_eq!(deps.len(), 1);
        let dep = &deps[0];
        assert!(dep.is_store_sourced());
        assert_eq!(dep.producer_kind, InstructionKind::Store);
        assert_eq!(dep.consumer_kind, InstructionKind::Load);
        assert_eq!((dep.available_stage, dep.needed_stage), (0, 0));
        assert_eq!(dep.available(), None);
        assert_eq!(dep.needed(), None);
    }
}

/// Tests that differing offsets or a register base do not alias.
#[test]
fn test_no_false_aliasing() {
    assert!(deps_of("sw $1, 0($2)\nlw $3, 4($2)", PipelineMode::Hazards).is_empty());
    assert!(deps_of("add $2,$3,$4\nlw $5, 0($2)", PipelineMode::Hazards).is_empty());
    assert!(deps_of("lw $1, 0($2)\nsw $3, 0($2)", PipelineMode::Hazards).is_empty());
}

/// Tests that producers always precede consumers.
#[test]
fn test_producer_precedes_consumer() {
    for mode in PipelineMode::ALL {
        for dep in deps_of(SEQUENCE, mode) {
            assert!(dep.producer < dep.consumer, "{}", dep);
        }
    }
}

/// Tests that analysis is idempotent.
#[test]
fn test_analysis_idempotent() {
    let program = parse_program(SEQUENCE);
    for mode in PipelineMode::ALL {
        let first = hazards::analyze(&program.instructions, mode);
        let second = hazards::analyze(&program.instructions, mode);
        assert_eq!(first, second);
    }
}

/// Tests that the observer sees every recorded dependence.
#[test]
fn test_analysis_observer() {
    let program = parse_program(SEQUENCE);
    let mut observer = RecordingObserver::default();
    let deps = hazards::analyze_with(&program.instructions, PipelineMode::Forwarding, &mut observer);
    assert_eq!(observer.dependences, deps);
    assert!(observer.evaluations.is_empty());
}

/// Tests the distance stall table.
#[test]
fn test_stall_for_distance() {
    use PipelineMode::*;
    assert_eq!(hazards::stall_for_distance(NoForwarding, 1), 2);
    assert_eq!(hazards::stall_for_distance(NoForwarding, 2), 1);
    assert_eq!(hazards::stall_for_distance(NoForwarding, 3), 0);
    assert_eq!(hazards::stall_for_distance(Forwarding, 1), 1);
    assert_eq!(hazards::stall_for_distance(Forwarding, 2), 0);
    assert_eq!(hazards::stall_for_distance(Hazards, 1), 0);
}

/// Tests that the display-only mode counts conflicts with no-forwarding timing.
#[test]
fn test_conflict_cycles() {
    use PipelineMode::*;
    assert_eq!(hazards::conflict_cycles(Hazards, 1), 2);
    assert_eq!(hazards::conflict_cycles(Hazards, 2), 1);
    assert_eq!(hazards::conflict_cycles(Hazards, 3), 0);
    assert_eq!(hazards::conflict_cycles(NoForwarding, 1), 2);
    assert_eq!(hazards::conflict_cycles(Forwarding, 1), 1);
    assert_eq!(hazards::conflict_cycles(Forwarding, 2), 0);
    assert_eq!(hazards::conflict_cycles(Forwarding, 7), 0);
}

/// Tests dependence display.
#[test]
fn test_dependence_display() {
    let deps = deps_of("lw $1, 0($2)\nadd $3,$1,$4", PipelineMode::Forwarding);
    assert_eq!(
        deps[0].to_string(),
        "I1 (lw) -> I2 (add) src1, available after MEM, needed at EX"
    );

    let store = deps_of("sw $1, 0($2)\nlw $3, 0($2)", PipelineMode::Forwarding);
    assert_eq!(store[0].to_string(), "I1 (sw) -> I2 (lw) src1, no register value");
}
