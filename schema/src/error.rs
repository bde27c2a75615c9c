//! Option dictionary conversion errors.

use std::fmt;

use wire::MessageKind;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when converting between typed options and dicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A recognized key holds a value of the wrong type.
    InvalidOptions { kind: MessageKind, reason: String },

    /// Typed options did not serialize to a dictionary.
    NotADict { kind: MessageKind },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOptions { kind, reason } => {
                write!(f, "invalid {kind} options: {reason}")
            }
            Self::NotADict { kind } => write!(f, "{kind} options did not serialize to a dict"),
        }
    }
}

impl std::error::Error for SchemaError {}
