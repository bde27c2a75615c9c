//! Positional/keyword payload and the trailing-slot normalization rule.

use serde_json::Value;

use crate::{Dict, List};

/// Optional call/event arguments carried by payload kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pub args: List,
    pub kwargs: Dict,
}

impl Payload {
    /// Creates a payload from positional and keyword arguments.
    #[must_use]
    pub const fn new(args: List, kwargs: Dict) -> Self {
        Self { args, kwargs }
    }

    /// Creates a payload with positional arguments only.
    #[must_use]
    pub fn from_args(args: List) -> Self {
        Self {
            args,
            kwargs: Dict::new(),
        }
    }

    /// Creates a payload with keyword arguments only.
    #[must_use]
    pub const fn from_kwargs(kwargs: Dict) -> Self {
        Self {
            args: Vec::new(),
            kwargs,
        }
    }

    /// Returns `true` if neither args nor kwargs carry anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }

    /// Trailing wire elements for this payload.
    #[must_use]
    pub fn trailing(&self) -> Vec<Value> {
        normalize_trailing_payload(&self.args, &self.kwargs)
    }
}

/// Computes the trailing elements a payload contributes to a message array.
///
/// kwargs can only follow args on the wire, so an empty args placeholder is
/// emitted whenever kwargs alone is non-empty:
///
/// | args     | kwargs   | trailing         |
/// |----------|----------|------------------|
/// | empty    | empty    | (none)           |
/// | empty    | nonempty | `[]`, `kwargs`   |
/// | nonempty | empty    | `args`           |
/// | nonempty | nonempty | `args`, `kwargs` |
#[must_use]
pub fn normalize_trailing_payload(args: &[Value], kwargs: &Dict) -> Vec<Value> {
    match (args.is_empty(), kwargs.is_empty()) {
        (true, true) => Vec::new(),
        (true, false) => vec![Value::Array(Vec::new()), Value::Object(kwargs.clone())],
        (false, true) => vec![Value::Array(args.to_vec())],
        (false, false) => vec![Value::Array(args.to_vec()), Value::Object(kwargs.clone())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kwargs_k1() -> Dict {
        let mut kwargs = Dict::new();
        kwargs.insert("k".into(), json!(1));
        kwargs
    }

    #[test]
    fn neither() {
        assert!(normalize_trailing_payload(&[], &Dict::new()).is_empty());
    }

    #[test]
    fn kwargs_only_synthesizes_empty_args() {
        assert_eq!(
            normalize_trailing_payload(&[], &kwargs_k1()),
            vec![json!([]), json!({"k": 1})]
        );
    }

    #[test]
    fn args_only() {
        assert_eq!(
            normalize_trailing_payload(&[json!(1)], &Dict::new()),
            vec![json!([1])]
        );
    }

    #[test]
    fn both() {
        assert_eq!(
            normalize_trailing_payload(&[json!(1)], &kwargs_k1()),
            vec![json!([1]), json!({"k": 1})]
        );
    }

    #[test]
    fn payload_constructors() {
        assert!(Payload::default().is_empty());
        assert!(!Payload::from_args(vec![json!(null)]).is_empty());
        assert!(!Payload::from_kwargs(kwargs_k1()).is_empty());
        assert_eq!(
            Payload::new(vec![json!("a")], kwargs_k1()).trailing(),
            vec![json!(["a"]), json!({"k": 1})]
        );
    }
}
