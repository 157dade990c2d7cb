//! Error types.
//!
//! Parsing and scheduling never fail; malformed instructions are skipped and
//! overflow is truncated. Errors only come from the layers around the core:
//! reading input, loading configuration, and serialising output.

use std::fmt;
use std::io;

/// Errors surfaced to the caller of the library's outer entry points.
#[derive(Debug)]
pub enum SimError {
    /// A file or stream could not be read.
    Io { path: String, source: io::Error },
    /// A configuration file is not valid TOML for [`crate::config::Config`].
    Config(toml::de::Error),
    /// An unrecognised pipeline mode name.
    InvalidMode(String),
    /// JSON output could not be produced.
    Json(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io { path, source } => write!(f, "could not read '{}': {}", path, source),
            SimError::Config(e) => write!(f, "invalid configuration: {}", e),
            SimError::InvalidMode(s) => write!(
                f,
                "unknown pipeline mode '{}' (expected hazards, no-forwarding or forwarding)",
                s
            ),
            SimError::Json(e) => write!(f, "could not serialize output: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io { source, .. } => Some(source),
            SimError::Config(e) => Some(e),
            SimError::Json(e) => Some(e),
            SimError::InvalidMode(_) => None,
        }
    }
}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::Config(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Json(e)
    }
}
