//! Raw array to [`Message`] decoding.

use serde_json::{Map, Value};

use crate::error::{DecodeError, WireResult};
use crate::field::FieldRole;
use crate::kind::MessageKind;
use crate::message::Message;
use crate::payload::Payload;
use crate::{Dict, Id, List};

/// Decodes a raw message array. Never fails.
///
/// Arrays without a recognized integer tag become [`Message::Unknown`] with
/// the input preserved exactly. For known kinds, absent or `null` dict slots
/// become `{}`, absent args/kwargs become `[]`/`{}`, extra trailing elements
/// are ignored, and slots of the wrong shape fall back to their shape default.
#[must_use]
pub fn decode_message(raw: Vec<Value>) -> Message {
    let (message, violation) = decode_with_violation(raw);
    if let Some(err) = violation {
        tracing::debug!(%err, "defaulted malformed message field");
    }
    message
}

/// Decodes a raw message array, rejecting structural violations.
///
/// Unknown tags are still returned as [`Message::Unknown`]. For known kinds
/// the first violation is reported: a missing integer/string slot, a present
/// slot of the wrong shape (`null` counts as an empty dict/list), or more
/// elements than the kind's layout allows.
pub fn try_decode_message(raw: Vec<Value>) -> WireResult<Message> {
    match decode_with_violation(raw) {
        (message, None) => Ok(message),
        (_, Some(err)) => Err(err),
    }
}

fn decode_with_violation(raw: Vec<Value>) -> (Message, Option<DecodeError>) {
    let kind = raw
        .first()
        .and_then(Value::as_u64)
        .map_or(MessageKind::Unknown, MessageKind::from_tag);
    if !kind.is_known() {
        tracing::trace!(tag = ?raw.first(), "unrecognized message tag");
        return (Message::Unknown { raw }, None);
    }

    let mut reader = FieldReader::new(kind, raw);
    let message = decode_known(kind, &mut reader);
    let violation = reader.finish();
    (message, violation)
}

fn decode_known(kind: MessageKind, r: &mut FieldReader) -> Message {
    use FieldRole as F;

    match kind {
        MessageKind::Hello => Message::Hello {
            realm: r.string(F::Realm),
            details: r.dict(F::Details),
        },
        MessageKind::Welcome => Message::Welcome {
            session: r.id(F::Session),
            details: r.dict(F::Details),
        },
        MessageKind::Abort => Message::Abort {
            details: r.dict(F::Details),
            reason: r.string(F::Reason),
        },
        MessageKind::Challenge => Message::Challenge {
            auth_method: r.string(F::AuthMethod),
            extra: r.dict(F::Extra),
        },
        MessageKind::Authenticate => Message::Authenticate {
            signature: r.string(F::Signature),
            extra: r.dict(F::Extra),
        },
        MessageKind::Goodbye => Message::Goodbye {
            details: r.dict(F::Details),
            reason: r.string(F::Reason),
        },
        MessageKind::Error => Message::Error {
            request_type: r.id(F::RequestType),
            request: r.id(F::Request),
            details: r.dict(F::Details),
            error: r.string(F::Error),
            payload: r.payload(),
        },
        MessageKind::Publish => Message::Publish {
            request: r.id(F::Request),
            options: r.dict(F::Options),
            topic: r.string(F::Topic),
            payload: r.payload(),
        },
        MessageKind::Published => Message::Published {
            request: r.id(F::Request),
            publication: r.id(F::Publication),
        },
        MessageKind::Subscribe => Message::Subscribe {
            request: r.id(F::Request),
            options: r.dict(F::Options),
            topic: r.string(F::Topic),
        },
        MessageKind::Subscribed => Message::Subscribed {
            request: r.id(F::Request),
            subscription: r.id(F::Subscription),
        },
        MessageKind::Unsubscribe => Message::Unsubscribe {
            request: r.id(F::Request),
            subscription: r.id(F::Subscription),
        },
        MessageKind::Unsubscribed => Message::Unsubscribed {
            request: r.id(F::Request),
        },
        MessageKind::Event => Message::Event {
            subscription: r.id(F::Subscription),
            publication: r.id(F::Publication),
            details: r.dict(F::Details),
            payload: r.payload(),
        },
        MessageKind::Call => Message::Call {
            request: r.id(F::Request),
            options: r.dict(F::Options),
            procedure: r.string(F::Procedure),
            payload: r.payload(),
        },
        MessageKind::Cancel => Message::Cancel {
            request: r.id(F::Request),
            options: r.dict(F::Options),
        },
        MessageKind::Result => Message::Result {
            request: r.id(F::Request),
            details: r.dict(F::Details),
            payload: r.payload(),
        },
        MessageKind::Register => Message::Register {
            request: r.id(F::Request),
            options: r.dict(F::Options),
            procedure: r.string(F::Procedure),
        },
        MessageKind::Registered => Message::Registered {
            request: r.id(F::Request),
            registration: r.id(F::Registration),
        },
        MessageKind::Unregister => Message::Unregister {
            request: r.id(F::Request),
            registration: r.id(F::Registration),
        },
        MessageKind::Unregistered => Message::Unregistered {
            request: r.id(F::Request),
        },
        MessageKind::Invocation => Message::Invocation {
            request: r.id(F::Request),
            registration: r.id(F::Registration),
            details: r.dict(F::Details),
            payload: r.payload(),
        },
        MessageKind::Interrupt => Message::Interrupt {
            request: r.id(F::Request),
            options: r.dict(F::Options),
        },
        MessageKind::Yield => Message::Yield {
            request: r.id(F::Request),
            options: r.dict(F::Options),
            payload: r.payload(),
        },
        MessageKind::Unknown => unreachable!("unknown kinds are returned before field decoding"),
    }
}

/// Positional slot reader driven by the kind's registered layout.
///
/// Every read yields a value; the first structural violation is recorded
/// rather than returned so lenient and strict decoding share one path.
struct FieldReader {
    kind: MessageKind,
    len: usize,
    values: std::vec::IntoIter<Value>,
    /// Index of the next slot within the raw array (the tag is index 0).
    index: usize,
    violation: Option<DecodeError>,
}

impl FieldReader {
    fn new(kind: MessageKind, raw: Vec<Value>) -> Self {
        let len = raw.len();
        let mut values = raw.into_iter();
        values.next();
        Self {
            kind,
            len,
            values,
            index: 1,
            violation: None,
        }
    }

    fn id(&mut self, role: FieldRole) -> Id {
        self.take(role).as_u64().unwrap_or_default()
    }

    fn string(&mut self, role: FieldRole) -> String {
        match self.take(role) {
            Value::String(text) => text,
            _ => String::new(),
        }
    }

    fn dict(&mut self, role: FieldRole) -> Dict {
        match self.take(role) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn list(&mut self, role: FieldRole) -> List {
        match self.take(role) {
            Value::Array(items) => items,
            _ => Vec::new(),
        }
    }

    /// Reads the next slot as a value of the role's shape.
    ///
    /// Absent or `null` defaultable slots take the role's registered default.
    /// Anything else that does not match records a violation and yields the
    /// shape's empty value.
    fn take(&mut self, role: FieldRole) -> Value {
        let (index, slot) = self.slot(role);
        let shape = role.shape();
        let slot = match slot {
            Some(value) if shape.matches(&value) => return value,
            other => other,
        };
        match (slot, role.default_value()) {
            (None | Some(Value::Null), Some(default)) => default,
            (None, None) => {
                self.missing(role, index);
                shape.empty_value()
            }
            (Some(_), _) => {
                self.invalid(role, index);
                shape.empty_value()
            }
        }
    }

    fn payload(&mut self) -> Payload {
        let args = self.list(FieldRole::Args);
        let kwargs = self.dict(FieldRole::Kwargs);
        Payload::new(args, kwargs)
    }

    /// Takes the next slot, checking it against the registered layout.
    fn slot(&mut self, role: FieldRole) -> (usize, Option<Value>) {
        let index = self.index;
        debug_assert_eq!(
            self.kind.layout().get(index - 1),
            Some(&role),
            "{} decoder out of step with its layout at index {index}",
            self.kind
        );
        self.index += 1;
        (index, self.values.next())
    }

    fn missing(&mut self, field: FieldRole, index: usize) {
        self.record(DecodeError::MissingField {
            kind: self.kind,
            field,
            index,
        });
    }

    fn invalid(&mut self, field: FieldRole, index: usize) {
        self.record(DecodeError::InvalidField {
            kind: self.kind,
            field,
            index,
            expected: field.shape(),
        });
    }

    fn record(&mut self, err: DecodeError) {
        if self.violation.is_none() {
            self.violation = Some(err);
        }
    }

    fn finish(mut self) -> Option<DecodeError> {
        let max_len = self.kind.max_len();
        if self.len > max_len {
            self.record(DecodeError::TrailingFields {
                kind: self.kind,
                max_len,
                actual: self.len,
            });
        }
        self.violation
    }
}
