//! [`Message`] to raw array encoding.

use serde_json::Value;

use crate::field::{FieldRole, FieldShape};
use crate::kind::MessageKind;
use crate::message::Message;
use crate::payload::Payload;
use crate::{Dict, Id};

/// Encodes a message as its minimal positional array.
///
/// Fields are emitted as stored, in registry order. Payload kinds append the
/// output of [`crate::normalize_trailing_payload`]. `Unknown` returns its captured
/// array unchanged.
#[must_use]
pub fn encode_message(message: &Message) -> Vec<Value> {
    use FieldRole as F;

    let mut w = match message {
        Message::Unknown { raw } => return raw.clone(),
        known => FieldWriter::new(known.kind()),
    };

    match message {
        Message::Hello { realm, details } => {
            w.string(F::Realm, realm);
            w.dict(F::Details, details);
        }
        Message::Welcome { session, details } => {
            w.id(F::Session, *session);
            w.dict(F::Details, details);
        }
        Message::Abort { details, reason } | Message::Goodbye { details, reason } => {
            w.dict(F::Details, details);
            w.string(F::Reason, reason);
        }
        Message::Challenge { auth_method, extra } => {
            w.string(F::AuthMethod, auth_method);
            w.dict(F::Extra, extra);
        }
        Message::Authenticate { signature, extra } => {
            w.string(F::Signature, signature);
            w.dict(F::Extra, extra);
        }
        Message::Error {
            request_type,
            request,
            details,
            error,
            payload,
        } => {
            w.id(F::RequestType, *request_type);
            w.id(F::Request, *request);
            w.dict(F::Details, details);
            w.string(F::Error, error);
            w.payload(payload);
        }
        Message::Publish {
            request,
            options,
            topic,
            payload,
        } => {
            w.id(F::Request, *request);
            w.dict(F::Options, options);
            w.string(F::Topic, topic);
            w.payload(payload);
        }
        Message::Published {
            request,
            publication,
        } => {
            w.id(F::Request, *request);
            w.id(F::Publication, *publication);
        }
        Message::Subscribe {
            request,
            options,
            topic,
        } => {
            w.id(F::Request, *request);
            w.dict(F::Options, options);
            w.string(F::Topic, topic);
        }
        Message::Subscribed {
            request,
            subscription,
        }
        | Message::Unsubscribe {
            request,
            subscription,
        } => {
            w.id(F::Request, *request);
            w.id(F::Subscription, *subscription);
        }
        Message::Unsubscribed { request } | Message::Unregistered { request } => {
            w.id(F::Request, *request);
        }
        Message::Event {
            subscription,
            publication,
            details,
            payload,
        } => {
            w.id(F::Subscription, *subscription);
            w.id(F::Publication, *publication);
            w.dict(F::Details, details);
            w.payload(payload);
        }
        Message::Call {
            request,
            options,
            procedure,
            payload,
        } => {
            w.id(F::Request, *request);
            w.dict(F::Options, options);
            w.string(F::Procedure, procedure);
            w.payload(payload);
        }
        Message::Cancel { request, options } | Message::Interrupt { request, options } => {
            w.id(F::Request, *request);
            w.dict(F::Options, options);
        }
        Message::Result {
            request,
            details,
            payload,
        } => {
            w.id(F::Request, *request);
            w.dict(F::Details, details);
            w.payload(payload);
        }
        Message::Register {
            request,
            options,
            procedure,
        } => {
            w.id(F::Request, *request);
            w.dict(F::Options, options);
            w.string(F::Procedure, procedure);
        }
        Message::Registered {
            request,
            registration,
        }
        | Message::Unregister {
            request,
            registration,
        } => {
            w.id(F::Request, *request);
            w.id(F::Registration, *registration);
        }
        Message::Invocation {
            request,
            registration,
            details,
            payload,
        } => {
            w.id(F::Request, *request);
            w.id(F::Registration, *registration);
            w.dict(F::Details, details);
            w.payload(payload);
        }
        Message::Yield {
            request,
            options,
            payload,
        } => {
            w.id(F::Request, *request);
            w.dict(F::Options, options);
            w.payload(payload);
        }
        Message::Unknown { .. } => {}
    }

    w.finish()
}

/// Positional slot writer that checks each write against the kind's layout.
struct FieldWriter {
    kind: MessageKind,
    out: Vec<Value>,
    /// Number of layout slots consumed, payload slots included.
    cursor: usize,
}

impl FieldWriter {
    fn new(kind: MessageKind) -> Self {
        let mut out = Vec::with_capacity(kind.max_len());
        if let Some(tag) = kind.tag() {
            out.push(Value::from(tag));
        }
        Self {
            kind,
            out,
            cursor: 0,
        }
    }

    fn id(&mut self, role: FieldRole, id: Id) {
        self.advance(role, FieldShape::Integer);
        self.out.push(Value::from(id));
    }

    fn string(&mut self, role: FieldRole, text: &str) {
        self.advance(role, FieldShape::String);
        self.out.push(Value::from(text));
    }

    fn dict(&mut self, role: FieldRole, dict: &Dict) {
        self.advance(role, FieldShape::Dict);
        self.out.push(Value::Object(dict.clone()));
    }

    fn payload(&mut self, payload: &Payload) {
        self.advance(FieldRole::Args, FieldShape::List);
        self.advance(FieldRole::Kwargs, FieldShape::Dict);
        self.out.extend(payload.trailing());
    }

    fn advance(&mut self, role: FieldRole, shape: FieldShape) {
        debug_assert_eq!(role.shape(), shape);
        debug_assert_eq!(
            self.kind.layout().get(self.cursor),
            Some(&role),
            "{} encoder out of step with its layout at slot {}",
            self.kind,
            self.cursor
        );
        self.cursor += 1;
    }

    fn finish(self) -> Vec<Value> {
        debug_assert_eq!(
            self.cursor,
            self.kind.layout().len(),
            "{} encoder skipped layout slots",
            self.kind
        );
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dict(value: Value) -> Dict {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn publish(payload: Payload) -> Message {
        Message::Publish {
            request: 123,
            options: dict(json!({"exclude_me": true})),
            topic: "test".into(),
            payload,
        }
    }

    #[test]
    fn call_example() {
        let msg = Message::Call {
            request: 123,
            options: dict(json!({"disclose_me": true})),
            procedure: "test".into(),
            payload: Payload::new(vec![json!(123)], dict(json!({"k": 1}))),
        };
        assert_eq!(
            Value::Array(encode_message(&msg)),
            json!([48, 123, {"disclose_me": true}, "test", [123], {"k": 1}])
        );
    }

    #[test]
    fn normalization_table() {
        let head = json!([16, 123, {"exclude_me": true}, "test"]);
        let cases = [
            (Payload::default(), json!([])),
            (Payload::from_kwargs(dict(json!({"k": 1}))), json!([[], {"k": 1}])),
            (Payload::from_args(vec![json!(1)]), json!([[1]])),
            (
                Payload::new(vec![json!(1)], dict(json!({"k": 1}))),
                json!([[1], {"k": 1}]),
            ),
        ];
        for (payload, trailing) in cases {
            let mut expected = head.as_array().cloned().unwrap();
            expected.extend(trailing.as_array().cloned().unwrap());
            assert_eq!(encode_message(&publish(payload)), expected);
        }
    }

    #[test]
    fn payload_kinds_end_with_trailing() {
        let payload = Payload::from_kwargs(dict(json!({"k": 1})));
        let messages = [
            publish(payload.clone()),
            Message::Event {
                subscription: 1,
                publication: 2,
                details: Dict::new(),
                payload: payload.clone(),
            },
            Message::Yield {
                request: 3,
                options: Dict::new(),
                payload: payload.clone(),
            },
        ];
        for msg in messages {
            let raw = encode_message(&msg);
            let head = msg.kind().min_len();
            assert_eq!(raw[head..].to_vec(), payload.trailing(), "{}", msg.kind());
        }
    }

    #[test]
    fn error_with_empty_payload_is_minimal() {
        let msg = Message::error(
            MessageKind::Subscribe,
            123,
            dict(json!({"a": 1})),
            "test",
            Payload::default(),
        );
        assert_eq!(
            Value::Array(encode_message(&msg)),
            json!([8, 32, 123, {"a": 1}, "test"])
        );
    }

    #[test]
    fn empty_dicts_are_emitted() {
        let msg = Message::Abort {
            details: Dict::new(),
            reason: "wamp.close.close_realm".into(),
        };
        assert_eq!(
            Value::Array(encode_message(&msg)),
            json!([3, {}, "wamp.close.close_realm"])
        );
    }

    #[test]
    fn unknown_is_identity() {
        let raw = vec![json!(1999), json!(51), json!("test")];
        let msg = Message::Unknown { raw: raw.clone() };
        assert_eq!(encode_message(&msg), raw);
    }

    #[test]
    fn every_kind_matches_its_layout_length() {
        let samples = [
            Message::Hello {
                realm: "realm1".into(),
                details: Dict::new(),
            },
            Message::Unsubscribed { request: 1 },
            Message::Yield {
                request: 1,
                options: Dict::new(),
                payload: Payload::default(),
            },
        ];
        for msg in samples {
            assert_eq!(encode_message(&msg).len(), msg.kind().min_len());
        }
    }
}
