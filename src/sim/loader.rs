//! Instruction Text Loader.
//!
//! Reads instruction sequences from a file or from standard input.

use std::fs;
use std::io::{self, Read};

use crate::common::error::SimError;

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Reads instruction text from `path`, or from stdin when `path` is `None`
/// or `"-"`.
pub fn load_source(path: Option<&str>) -> Result<String, SimError> {
    match path {
        None | Some(STDIN_PATH) => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| SimError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_string(),
            source,
        }),
    }
}
