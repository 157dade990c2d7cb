//! End-to-end tests: text in, schedule, hazards, statistics and JSON out.

use pipeline_hazards::config::Config;
use pipeline_hazards::core::pipeline::traits::{NullObserver, RecordingObserver};
use pipeline_hazards::core::PipelineMode;
use pipeline_hazards::sim::analyze_program;

const SEQUENCE: &str = "lw $2, 20($1)
add $4, $2, $5
sub $8, $2, $6
add $9, $4, $2
sw $9, 12($3)";

const ADJACENT: &str = "add $1,$2,$3\nadd $4,$1,$5\n";

/// Tests the forwarding run of two dependent adds.
#[test]
fn test_adjacent_forwarding() {
    let mut observer = RecordingObserver::default();
    let a = analyze_program(
        ADJACENT,
        PipelineMode::Forwarding,
        &Config::default(),
        &mut observer,
    );

    assert_eq!(a.mode(), PipelineMode::Forwarding);
    assert_eq!(a.program.len(), 2);
    assert_eq!(a.dependences.len(), 1);
    assert_eq!(a.hazards().len(), 1);
    assert_eq!(a.result.schedule.rows()[1], [2, 4, 5, 6, 7]);

    assert_eq!(observer.dependences, a.dependences);
    assert_eq!(observer.evaluations.len(), 1);
    let eval = &observer.evaluations[0];
    assert_eq!(eval.available_cycle, 3);
    assert_eq!(eval.needed_cycle, 4);
    assert_eq!(eval.stall, 1);
    assert!(eval.kept);
    assert_eq!(observer.stalls.len(), 1);
    assert_eq!(observer.stalls[0].cycles, 1);
}

/// Tests the no-forwarding run of two dependent adds.
#[test]
fn test_adjacent_no_forwarding() {
    let mut observer = RecordingObserver::default();
    let a = analyze_program(
        ADJACENT,
        PipelineMode::NoForwarding,
        &Config::default(),
        &mut observer,
    );

    assert_eq!(a.result.schedule.rows()[1], [2, 5, 6, 7, 8]);
    let eval = &observer.evaluations[0];
    assert_eq!(eval.available_cycle, 5);
    assert_eq!(eval.needed_cycle, 3);
    assert_eq!(eval.stall, 2);
    assert_eq!(a.result.stall_cycles(), 2);
}

/// Tests that the display-only mode reports without stalling.
#[test]
fn test_adjacent_hazards_mode() {
    let a = analyze_program(
        ADJACENT,
        PipelineMode::Hazards,
        &Config::default(),
        &mut NullObserver,
    );
    assert_eq!(a.result.schedule, a.result.naive);
    assert_eq!(a.hazards().len(), 1);
    assert_eq!(a.stats.stall_cycles, 0);
}

/// Tests the statistics summary.
#[test]
fn test_stats() {
    let a = analyze_program(
        ADJACENT,
        PipelineMode::Forwarding,
        &Config::default(),
        &mut NullObserver,
    );
    let stats = &a.stats;
    assert_eq!(stats.instructions, 2);
    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.ideal_cycles, 6);
    assert_eq!(stats.stall_cycles, 1);
    assert_eq!(stats.dependences, 1);
    assert_eq!(stats.hazards, 1);
    assert_eq!(stats.truncated, 0);
    assert!((stats.cpi() - 3.5).abs() < 1e-9);

    let report = stats.to_string();
    assert!(report.contains("(forwarding)"));
    assert!(report.contains("sched_cycles             7"));
    assert!(report.contains("stalls.data            1"));
    assert!(!report.contains("insts.truncated"));
}

/// Tests that an empty input yields an empty run.
#[test]
fn test_empty_input() {
    for mode in PipelineMode::ALL {
        let a = analyze_program("\n\n", mode, &Config::default(), &mut NullObserver);
        assert!(a.program.is_empty());
        assert!(a.result.schedule.is_empty());
        assert!(a.hazards().is_empty());
        assert_eq!(a.stats.cycles, 0);
        assert_eq!(a.stats.cpi(), 0.0);
    }
}

/// Tests that invalid lines are skipped without consuming a number.
#[test]
fn test_rejected_lines() {
    let text = "add $1,$2,$3\nmul $4,$1,$1\n\nadd $4,$1,$5\n";
    let a = analyze_program(
        text,
        PipelineMode::NoForwarding,
        &Config::default(),
        &mut NullObserver,
    );

    assert_eq!(a.program.len(), 2);
    assert_eq!(a.program.rejected.len(), 1);
    assert_eq!(a.program.rejected[0].line, 2);
    assert_eq!(a.program.rejected[0].text, "mul $4,$1,$1");
    assert_eq!(a.program.instructions[1].number, 2);
    assert_eq!(a.hazards().len(), 1);
    assert_eq!(a.result.schedule.rows()[1], [2, 5, 6, 7, 8]);
}

/// Tests the full sequence in every mode.
#[test]
fn test_sequence_all_modes() {
    let config = Config::default();
    let expected = [
        (PipelineMode::Hazards, 9, 0, 4),
        (PipelineMode::NoForwarding, 15, 6, 4),
        (PipelineMode::Forwarding, 11, 2, 2),
    ];
    for (mode, cycles, stalls, hazards) in expected {
        let a = analyze_program(SEQUENCE, mode, &config, &mut NullObserver);
        assert_eq!(a.dependences.len(), 5, "{}", mode);
        assert_eq!(a.stats.cycles, cycles, "{}", mode);
        assert_eq!(a.stats.stall_cycles, stalls, "{}", mode);
        assert_eq!(a.stats.hazards, hazards, "{}", mode);
        assert_eq!(a.stats.ideal_cycles, 9, "{}", mode);
    }
}

/// Tests that bubbles from successive dependences accumulate.
#[test]
fn test_accumulated_stalls() {
    let text = "add $1,$2,$3\nadd $4,$5,$6\nadd $7,$1,$4\n";
    let mut observer = RecordingObserver::default();
    let a = analyze_program(
        text,
        PipelineMode::NoForwarding,
        &Config::default(),
        &mut observer,
    );
    assert_eq!(a.stats.stall_cycles, 3);
    assert_eq!(a.stats.cycles, 10);
    let cycles: Vec<u64> = observer.stalls.iter().map(|s| s.cycles).collect();
    assert_eq!(cycles, vec![2, 1]);
}

/// Tests that the configured window bounds the schedule.
#[test]
fn test_config_capacity() {
    let config = Config::from_toml("[pipeline]\ncapacity = 3\n").unwrap();
    let a = analyze_program(SEQUENCE, PipelineMode::Forwarding, &config, &mut NullObserver);
    assert_eq!(a.program.len(), 5);
    assert_eq!(a.result.schedule.len(), 3);
    assert_eq!(a.result.truncated, 2);
    assert_eq!(a.stats.truncated, 2);
    assert!(a.stats.to_string().contains("insts.truncated        2"));
    assert!(a.hazards().iter().all(|h| h.consumer <= 3));

    let open = Config::from_toml("[pipeline]\ncapacity = 0\n").unwrap();
    let a = analyze_program(SEQUENCE, PipelineMode::Forwarding, &open, &mut NullObserver);
    assert_eq!(a.result.schedule.len(), 5);
    assert_eq!(a.result.truncated, 0);
}

/// Tests the JSON export.
#[test]
fn test_json_export() {
    let a = analyze_program(
        ADJACENT,
        PipelineMode::Forwarding,
        &Config::default(),
        &mut NullObserver,
    );
    let json = a.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["result"]["mode"], "forwarding");
    assert_eq!(
        value["result"]["schedule"]["rows"][1],
        serde_json::json!([2, 4, 5, 6, 7])
    );
    assert_eq!(value["result"]["hazards"][0]["producer"], 1);
    assert_eq!(value["result"]["hazards"][0]["consumer"], 2);
    assert_eq!(value["stats"]["stall_cycles"], 1);
    assert_eq!(value["program"]["instructions"][0]["kind"], "add");
}
