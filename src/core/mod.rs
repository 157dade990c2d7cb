//! Pipeline scheduling core.
//!
//! Dependence analysis lives in [`pipeline::hazards`]; [`scheduler`] turns the
//! dependences into a cycle schedule for a given [`pipeline::PipelineMode`].

/// Five-stage pipeline model: stages, modes, hazards and schedules.
pub mod pipeline;

/// Bubble insertion and hazard filtering.
pub mod scheduler;

pub use pipeline::{PipelineMode, Stage};
pub use scheduler::{PipelineScheduler, ScheduleResult};
