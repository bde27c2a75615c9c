//! Field roles and value shapes for message slots.

use std::fmt;

use serde_json::{Map, Value};

/// The shape a slot's value is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    /// Unsigned integer (IDs and message tags).
    Integer,
    /// String (URIs, realms, auth methods, signatures).
    String,
    /// String-keyed dictionary.
    Dict,
    /// Ordered list.
    List,
}

impl FieldShape {
    /// Returns `true` if `value` has this shape.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_u64(),
            Self::String => value.is_string(),
            Self::Dict => value.is_object(),
            Self::List => value.is_array(),
        }
    }

    /// Returns `true` if an absent slot of this shape may be defaulted.
    #[must_use]
    pub const fn is_defaultable(self) -> bool {
        matches!(self, Self::Dict | Self::List)
    }

    /// Zero value of the shape: `0`, `""`, `{}` or `[]`.
    ///
    /// Lenient decoding puts this in place of a malformed slot.
    #[must_use]
    pub fn empty_value(self) -> Value {
        match self {
            Self::Integer => Value::from(0u64),
            Self::String => Value::String(String::new()),
            Self::Dict => Value::Object(Map::new()),
            Self::List => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Dict => "dict",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// The meaning of a positional slot within a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// Tag of the request an ERROR responds to.
    RequestType,
    /// Request ID.
    Request,
    /// Session ID.
    Session,
    /// Subscription ID.
    Subscription,
    /// Registration ID.
    Registration,
    /// Publication ID.
    Publication,
    Realm,
    AuthMethod,
    Signature,
    Details,
    Options,
    Extra,
    Reason,
    Error,
    Topic,
    Procedure,
    /// Positional payload arguments.
    Args,
    /// Keyword payload arguments.
    Kwargs,
}

impl FieldRole {
    /// Value shape of the slot.
    #[must_use]
    pub const fn shape(self) -> FieldShape {
        match self {
            Self::RequestType
            | Self::Request
            | Self::Session
            | Self::Subscription
            | Self::Registration
            | Self::Publication => FieldShape::Integer,
            Self::Realm
            | Self::AuthMethod
            | Self::Signature
            | Self::Reason
            | Self::Error
            | Self::Topic
            | Self::Procedure => FieldShape::String,
            Self::Details | Self::Options | Self::Extra | Self::Kwargs => FieldShape::Dict,
            Self::Args => FieldShape::List,
        }
    }

    /// Snake-case name of the role, e.g. `"procedure"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RequestType => "request_type",
            Self::Request => "request",
            Self::Session => "session",
            Self::Subscription => "subscription",
            Self::Registration => "registration",
            Self::Publication => "publication",
            Self::Realm => "realm",
            Self::AuthMethod => "auth_method",
            Self::Signature => "signature",
            Self::Details => "details",
            Self::Options => "options",
            Self::Extra => "extra",
            Self::Reason => "reason",
            Self::Error => "error",
            Self::Topic => "topic",
            Self::Procedure => "procedure",
            Self::Args => "args",
            Self::Kwargs => "kwargs",
        }
    }

    /// Value an absent or `null` slot takes, if the role is defaultable.
    #[must_use]
    pub fn default_value(self) -> Option<Value> {
        let shape = self.shape();
        shape.is_defaultable().then(|| shape.empty_value())
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
