//! Pipeline Hazard Scheduler CLI.
//!
//! Reads an instruction sequence, schedules it under one or all pipeline
//! modes, and prints the pipeline diagram, the hazards found and a
//! statistics summary.

use std::process;

use clap::{Parser, ValueEnum};

extern crate pipeline_hazards;

use pipeline_hazards::common::SimError;
use pipeline_hazards::config::Config;
use pipeline_hazards::core::pipeline::traits::{HazardObserver, NullObserver, TraceObserver};
use pipeline_hazards::core::PipelineMode;
use pipeline_hazards::sim::{analyze_program, loader, Analysis};

/// Command-line arguments for the pipeline hazard scheduler.
#[derive(Parser, Debug)]
#[command(author, version, about = "Five-stage pipeline hazard scheduler")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Instruction file; reads stdin when omitted or `-`
    #[arg(short, long)]
    file: Option<String>,

    /// Pipeline mode; defaults to the configured one
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Display window size (0 for unbounded)
    #[arg(long)]
    capacity: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Trace hazard decisions on stderr
    #[arg(long)]
    trace: bool,
}

/// Mode selection on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Report hazards on the fully overlapped schedule
    #[value(alias = "display-hazards")]
    Hazards,
    /// Stall until the producer writes back
    NoForwarding,
    /// Stall until the result can be forwarded
    Forwarding,
    /// Run every mode in turn
    All,
}

impl ModeArg {
    fn modes(self) -> Vec<PipelineMode> {
        match self {
            ModeArg::Hazards => vec![PipelineMode::Hazards],
            ModeArg::NoForwarding => vec![PipelineMode::NoForwarding],
            ModeArg::Forwarding => vec![PipelineMode::Forwarding],
            ModeArg::All => PipelineMode::ALL.to_vec(),
        }
    }
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(capacity) = args.capacity {
        config.pipeline.capacity = capacity;
    }
    if args.trace {
        config.general.trace = true;
    }

    init_tracing(config.trace_enabled());

    let modes = match args.mode {
        Some(mode) => mode.modes(),
        None => vec![config.pipeline.mode],
    };

    let text = loader::load_source(args.file.as_deref())?;

    let mut trace_observer = TraceObserver;
    let mut null_observer = NullObserver;
    let observer: &mut dyn HazardObserver = if config.trace_enabled() {
        &mut trace_observer
    } else {
        &mut null_observer
    };

    let mut analyses = Vec::with_capacity(modes.len());
    for mode in modes {
        analyses.push(analyze_program(&text, mode, &config, &mut *observer));
    }

    if args.json {
        for analysis in &analyses {
            println!("{}", analysis.to_json()?);
        }
        return Ok(());
    }

    if let Some(first) = analyses.first() {
        for rejected in &first.program.rejected {
            eprintln!(
                "[!] line {}: skipped invalid instruction '{}'",
                rejected.line, rejected.text
            );
        }
        if first.result.truncated > 0 {
            eprintln!(
                "[!] {} instruction(s) past the display window were not scheduled",
                first.result.truncated
            );
        }
    }

    for analysis in &analyses {
        print_analysis(analysis);
    }
    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    println!("[*] Mode: {}", analysis.mode());
    for inst in &analysis.program.instructions {
        println!("    {}", inst);
    }
    println!();
    print!("{}", analysis.result.schedule);
    println!();

    if analysis.hazards().is_empty() {
        println!("[*] No hazards");
    } else {
        println!("[*] Hazards:");
        for hazard in analysis.hazards() {
            println!("    {}", hazard);
        }
    }
    for stall in &analysis.result.stalls {
        println!(
            "    stall: {} cycle(s) before I{} decodes (waiting on I{})",
            stall.cycles, stall.consumer, stall.producer
        );
    }
    println!();
    analysis.stats.print();
    println!();
}

/// Installs a stderr `tracing` subscriber: DEBUG when tracing, WARN otherwise.
fn init_tracing(trace: bool) {
    let level = if trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
