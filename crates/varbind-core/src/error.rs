#![forbid(unsafe_code)]

//! Error types.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Immutable write | `set` on a non-mutable variable | Warning logged, [`WriteOutcome::Rejected`](crate::WriteOutcome::Rejected), no error |
//! | Unsupported clamp | Clamping configured for `bool` | [`ConfigError::UnsupportedClamp`] at construction |
//! | Inverted bounds | `min > max` or NaN bounds | [`ConfigError::InvertedClampBounds`] at construction |
//! | Kind mismatch | Type-erased write of the wrong kind | [`VariableError::KindMismatch`] |
//! | Unassigned reference | Read/write through a reference with no live variable | Zero value / write dropped |

use std::fmt;

use crate::value::ValueKind;

/// Errors detected while validating a variable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Clamping was requested for a kind with no ordering.
    UnsupportedClamp { kind: ValueKind },
    /// The clamp range is inverted (or unordered, e.g. NaN bounds).
    InvertedClampBounds { min: String, max: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedClamp { kind } => {
                write!(f, "variables of kind '{kind}' cannot be clamped")
            }
            Self::InvertedClampBounds { min, max } => {
                write!(f, "clamp bounds are inverted: min {min} > max {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors from type-erased variable access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableError {
    /// A value of the wrong kind was written through the erased interface.
    KindMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
}

impl fmt::Display for VariableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { expected, found } => {
                write!(f, "kind mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for VariableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ConfigError::UnsupportedClamp {
            kind: ValueKind::Bool,
        };
        assert_eq!(err.to_string(), "variables of kind 'bool' cannot be clamped");

        let err = ConfigError::InvertedClampBounds {
            min: "10".into(),
            max: "0".into(),
        };
        assert!(err.to_string().contains("min 10 > max 0"));

        let err = VariableError::KindMismatch {
            expected: ValueKind::Float,
            found: ValueKind::Int,
        };
        assert_eq!(err.to_string(), "kind mismatch: expected float, found int");
    }
}
