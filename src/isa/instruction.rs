//! Typed instruction representation.
//!
//! An [`Instruction`] is built once by the parser from a single source line
//! and never changes afterwards. Invalid lines carry no operand data at all;
//! the type system enforces that through [`Operands`].

use std::fmt;

use serde::Serialize;

use crate::isa::location::DataLocation;

/// Instruction class as decoded from the mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionKind {
    /// `add rd, rs, rt`
    Add,
    /// `sub rd, rs, rt`
    Sub,
    /// `lw rt, offset(base)`
    Load,
    /// `sw rt, offset(base)`
    Store,
    /// Unknown mnemonic or malformed operands.
    Invalid,
}

impl InstructionKind {
    /// Maps an assembly mnemonic to its kind.
    pub fn from_mnemonic(mnemonic: &str) -> Self {
        match mnemonic {
            "add" => Self::Add,
            "sub" => Self::Sub,
            "lw" => Self::Load,
            "sw" => Self::Store,
            _ => Self::Invalid,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Load => "lw",
            Self::Store => "sw",
            Self::Invalid => "invalid",
        }
    }

    /// Number of comma-separated operands the mnemonic requires.
    pub fn arity(self) -> Option<usize> {
        match self {
            Self::Add | Self::Sub => Some(3),
            Self::Load | Self::Store => Some(2),
            Self::Invalid => None,
        }
    }

    pub fn is_alu(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Destination and source operands of a valid instruction.
///
/// `None` marks an operand slot the instruction does not use: loads and stores
/// have no second source, and stores produce no register result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Operands {
    pub destination: Option<DataLocation>,
    pub source1: Option<DataLocation>,
    pub source2: Option<DataLocation>,
}

/// One parsed instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// 1-based position among valid instructions.
    pub number: usize,
    pub kind: InstructionKind,
    /// `None` exactly when `kind` is [`InstructionKind::Invalid`].
    pub operands: Option<Operands>,
}

impl Instruction {
    pub fn new(number: usize, kind: InstructionKind, operands: Operands) -> Self {
        Self {
            number,
            kind,
            operands: Some(operands),
        }
    }

    pub fn invalid(number: usize) -> Self {
        Self {
            number,
            kind: InstructionKind::Invalid,
            operands: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.kind != InstructionKind::Invalid
    }

    pub fn destination(&self) -> Option<&DataLocation> {
        self.operands.as_ref()?.destination.as_ref()
    }

    pub fn source1(&self) -> Option<&DataLocation> {
        self.operands.as_ref()?.source1.as_ref()
    }

    pub fn source2(&self) -> Option<&DataLocation> {
        self.operands.as_ref()?.source2.as_ref()
    }

    /// Source operand by slot number (1 or 2).
    pub fn source(&self, slot: u8) -> Option<&DataLocation> {
        match slot {
            1 => self.source1(),
            2 => self.source2(),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    /// Renders the instruction back in assembly syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(ops) = &self.operands else {
            return write!(f, "I{}: <invalid>", self.number);
        };
        let show = |loc: &Option<DataLocation>| {
            loc.as_ref().map(|l| l.to_string()).unwrap_or_default()
        };
        match self.kind {
            InstructionKind::Add | InstructionKind::Sub => write!(
                f,
                "I{}: {} {}, {}, {}",
                self.number,
                self.kind,
                show(&ops.destination),
                show(&ops.source1),
                show(&ops.source2)
            ),
            InstructionKind::Load => write!(
                f,
                "I{}: {} {}, {}",
                self.number,
                self.kind,
                show(&ops.destination),
                show(&ops.source1)
            ),
            InstructionKind::Store => write!(
                f,
                "I{}: {} {}, {}",
                self.number,
                self.kind,
                show(&ops.source1),
                show(&ops.destination)
            ),
            InstructionKind::Invalid => write!(f, "I{}: <invalid>", self.number),
        }
    }
}
