//! Error types surfaced by the fleet core.
//!
//! "Capability absent" is deliberately not represented here: bulk operations
//! report it as an `Outcome::Unsupported` and keep going.

use std::fmt;
use std::num::ParseIntError;

/// Registry and factory failures. Recoverable at the request that caused them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    IndexOutOfRange { index: i64, len: usize },
    UnknownKind(String),
}

/// A repair action reported that it could not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairError {
    pub description: String,
}

impl RepairError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Malformed numeric input typed at the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    InvalidIndex { input: String, error: ParseIntError },
    InvalidYear { input: String, error: ParseIntError },
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::IndexOutOfRange { index, len } => write!(
                f,
                "index {index} is out of range for a fleet of {len} vehicle(s)"
            ),
            FleetError::UnknownKind(name) => write!(f, "unknown vehicle kind '{name}'"),
        }
    }
}

impl std::error::Error for FleetError {}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl std::error::Error for RepairError {}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::InvalidIndex { input, .. } => write!(f, "invalid index '{input}'"),
            InputError::InvalidYear { input, .. } => write!(f, "invalid year '{input}'"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::InvalidIndex { error, .. } | InputError::InvalidYear { error, .. } => {
                Some(error)
            }
        }
    }
}
