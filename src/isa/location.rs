//! Storage locations named by instruction operands.

use std::fmt;

use serde::Serialize;

/// A register or an `offset(base)` memory location.
///
/// Two locations name the same storage iff they are the same variant with the
/// same register name and, for memory, the same offset text. A register never
/// equals a memory location based on that register.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataLocation {
    /// A named register, e.g. `$t0`.
    Register { name: String },
    /// A memory word addressed as `offset(base)`.
    Memory { base: String, offset: String },
}

impl DataLocation {
    pub fn register(name: impl Into<String>) -> Self {
        Self::Register { name: name.into() }
    }

    pub fn memory(base: impl Into<String>, offset: impl Into<String>) -> Self {
        Self::Memory {
            base: base.into(),
            offset: offset.into(),
        }
    }

    pub fn is_register(&self) -> bool {
        matches!(self, Self::Register { .. })
    }

    /// Name of the register, or of the base register for a memory location.
    pub fn register_name(&self) -> &str {
        match self {
            Self::Register { name } => name,
            Self::Memory { base, .. } => base,
        }
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register { name } => write!(f, "{}", name),
            Self::Memory { base, offset } => write!(f, "{}({})", offset, base),
        }
    }
}
