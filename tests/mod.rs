//! Test module organization.
//!
//! This module organizes all integration tests for the pipeline scheduler.


/// Read-after-write dependence analysis tests.
mod hazard_tests;

/// End-to-end analysis, statistics and JSON output tests.
mod integration_tests;
