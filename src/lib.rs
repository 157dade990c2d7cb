//! Five-Stage Pipeline Hazard Scheduler.
//!
//! This crate models a short sequence of MIPS-style instructions (`add`,
//! `sub`, `lw`, `sw`) flowing through a classic five-stage pipeline and
//! computes, per instruction, the clock cycle at which it occupies each stage.
//!
//! # Modes
//!
//! * **Hazards**: fully overlapped issue; read-after-write hazards are only
//!   reported.
//! * **No forwarding**: bubbles until the producer has written back.
//! * **Forwarding**: bubbles until the producer's result can be forwarded
//!   into Execute.
//!
//! # Modules
//!
//! * `common`: Error types.
//! * `config`: Configuration loading and parsing.
//! * `core`: Dependence analysis and schedule construction.
//! * `isa`: Instruction types and the text parser.
//! * `sim`: Input loading and end-to-end runs.
//! * `stats`: Schedule statistics.

/// Shared error types.
pub mod common;

/// Configuration system for the display window, default mode and tracing.
///
/// Loads and parses TOML configuration files.
pub mod config;

/// Pipeline model, read-after-write analysis and the scheduler.
///
/// Implements the five-stage pipeline timing, bubble insertion for the
/// stalling modes, and filtering of dependences down to real hazards.
pub mod core;

/// Instruction Set definitions and the assembly parser.
pub mod isa;

/// Simulation harness: instruction loaders and the parse-analyse-schedule
/// driver.
pub mod sim;

/// Schedule statistics collection and reporting.
pub mod stats;
