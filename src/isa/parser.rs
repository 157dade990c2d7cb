//! Instruction text parser.
//!
//! Parsing never fails: malformed text is demoted to an
//! [`InstructionKind::Invalid`] instruction, and [`parse_program`] drops those
//! before numbering so that valid instructions are numbered contiguously.

use serde::Serialize;

use crate::isa::instruction::{Instruction, InstructionKind, Operands};
use crate::isa::location::DataLocation;

/// Parses one line of assembly into an instruction numbered `number`.
///
/// Register names and offsets are free-form tokens; no numeric validation is
/// performed on either.
///
/// # Examples
///
/// ```
/// use pipeline_hazards::isa::{parse, DataLocation, InstructionKind};
///
/// let inst = parse("lw $t0, 8($sp)", 1);
/// assert_eq!(inst.kind, InstructionKind::Load);
/// assert_eq!(inst.source1(), Some(&DataLocation::memory("$sp", "8")));
/// ```
pub fn parse(line: &str, number: usize) -> Instruction {
    let line = line.trim();
    let (mnemonic, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    let kind = InstructionKind::from_mnemonic(mnemonic);
    let Some(arity) = kind.arity() else {
        return Instruction::invalid(number);
    };

    let tokens: Vec<&str> = rest.split(',').map(str::trim).collect();
    if tokens.len() != arity {
        return Instruction::invalid(number);
    }

    let operands = match kind {
        InstructionKind::Add | InstructionKind::Sub => Operands {
            destination: Some(DataLocation::register(tokens[0])),
            source1: Some(DataLocation::register(tokens[1])),
            source2: Some(DataLocation::register(tokens[2])),
        },
        InstructionKind::Load => {
            let Some(memory) = parse_memory_operand(tokens[1]) else {
                return Instruction::invalid(number);
            };
            Operands {
                destination: Some(DataLocation::register(tokens[0])),
                source1: Some(memory),
                source2: None,
            }
        }
        InstructionKind::Store => {
            let Some(memory) = parse_memory_operand(tokens[1]) else {
                return Instruction::invalid(number);
            };
            Operands {
                destination: Some(memory),
                source1: Some(DataLocation::register(tokens[0])),
                source2: None,
            }
        }
        InstructionKind::Invalid => return Instruction::invalid(number),
    };

    Instruction::new(number, kind, operands)
}

/// Decodes an `offset(base)` operand.
///
/// The token is split on `(` and `)`; exactly two non-empty fragments must
/// remain, the offset text followed by the base register name.
fn parse_memory_operand(token: &str) -> Option<DataLocation> {
    let fragments: Vec<&str> = token
        .split(['(', ')'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    match fragments.as_slice() {
        [offset, base] => Some(DataLocation::memory(*base, *offset)),
        _ => None,
    }
}

/// A source line that did not parse as a valid instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RejectedLine {
    /// 1-based line number in the input text.
    pub line: usize,
    pub text: String,
}

/// The valid instructions of an input text, in program order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    /// Non-blank lines that were skipped as invalid.
    pub rejected: Vec<RejectedLine>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Parses newline-separated instruction text.
///
/// Blank lines are ignored. Invalid lines are recorded in
/// [`Program::rejected`] and consume no instruction number.
pub fn parse_program(text: &str) -> Program {
    let mut program = Program::default();

    for (idx, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let inst = parse(raw, program.instructions.len() + 1);
        if inst.is_valid() {
            program.instructions.push(inst);
        } else {
            program.rejected.push(RejectedLine {
                line: idx + 1,
                text: raw.trim().to_string(),
            });
        }
    }

    program
}
