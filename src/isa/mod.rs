//! Instruction Set definitions for the modelled MIPS subset.
//!
//! Only four instructions are recognised: `add`, `sub`, `lw` and `sw`. This
//! module holds the storage locations they name, the typed instruction form,
//! and the text parser that produces it.

/// Register and memory storage locations.
pub mod location;

/// Typed instructions and their kinds.
pub mod instruction;

/// Line and program parsing.
pub mod parser;

pub use instruction::{Instruction, InstructionKind, Operands};
pub use location::DataLocation;
pub use parser::{parse, parse_program, Program, RejectedLine};
