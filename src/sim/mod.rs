//! Simulation harness: input loading and end-to-end runs.

/// Instruction text loaders.
pub mod loader;

/// Parse, analyse and schedule in one call.
pub mod runner;

pub use runner::{analyze_program, Analysis};
