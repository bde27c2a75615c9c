//! Error types for strict message decoding.

use std::fmt;

use crate::field::{FieldRole, FieldShape};
use crate::kind::MessageKind;

/// Result type for strict decoding.
pub type WireResult<T> = Result<T, DecodeError>;

/// Structural violations found while decoding a known message kind.
///
/// Lenient decoding defaults these away; only strict decoding surfaces them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A mandatory slot without a default is absent.
    MissingField {
        kind: MessageKind,
        field: FieldRole,
        index: usize,
    },

    /// A slot is present but holds a value of the wrong shape.
    InvalidField {
        kind: MessageKind,
        field: FieldRole,
        index: usize,
        expected: FieldShape,
    },

    /// The array is longer than the kind's full layout.
    TrailingFields {
        kind: MessageKind,
        max_len: usize,
        actual: usize,
    },
}

impl DecodeError {
    /// Kind of the message that failed to decode.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::MissingField { kind, .. }
            | Self::InvalidField { kind, .. }
            | Self::TrailingFields { kind, .. } => *kind,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { kind, field, index } => {
                write!(f, "{kind} is missing mandatory field {field} at index {index}")
            }
            Self::InvalidField {
                kind,
                field,
                index,
                expected,
            } => {
                write!(
                    f,
                    "{kind} field {field} at index {index} is not a {expected}"
                )
            }
            Self::TrailingFields {
                kind,
                max_len,
                actual,
            } => {
                write!(
                    f,
                    "{kind} has {actual} elements, at most {max_len} allowed"
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = DecodeError::MissingField {
            kind: MessageKind::Call,
            field: FieldRole::Procedure,
            index: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("CALL"));
        assert!(msg.contains("procedure"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn invalid_field_display() {
        let err = DecodeError::InvalidField {
            kind: MessageKind::Event,
            field: FieldRole::Args,
            index: 4,
            expected: FieldShape::List,
        };
        let msg = err.to_string();
        assert!(msg.contains("EVENT"));
        assert!(msg.contains("not a list"));
    }

    #[test]
    fn trailing_fields_display() {
        let err = DecodeError::TrailingFields {
            kind: MessageKind::Unsubscribed,
            max_len: 2,
            actual: 5,
        };
        assert!(err.to_string().contains("5 elements"));
        assert_eq!(err.kind(), MessageKind::Unsubscribed);
    }
}
