//! Common types shared by the library and the command-line front end.

/// Error types for the outer layers (I/O, configuration, output).
pub mod error;

pub use error::SimError;
