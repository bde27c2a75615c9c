//! The typed message model.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::decode::decode_message;
use crate::encode::encode_message;
use crate::kind::MessageKind;
use crate::payload::Payload;
use crate::{Dict, Id};

/// A WAMP message, one variant per message kind.
///
/// Dict fields are always present (possibly empty). Payload kinds carry a
/// [`Payload`] whose empty args/kwargs are omitted on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Hello {
        realm: String,
        details: Dict,
    },
    Welcome {
        session: Id,
        details: Dict,
    },
    Abort {
        details: Dict,
        reason: String,
    },
    Challenge {
        auth_method: String,
        extra: Dict,
    },
    Authenticate {
        signature: String,
        extra: Dict,
    },
    Goodbye {
        details: Dict,
        reason: String,
    },
    Error {
        /// Raw tag of the request this error answers; see [`Message::request_kind`].
        request_type: u64,
        request: Id,
        details: Dict,
        error: String,
        payload: Payload,
    },
    Publish {
        request: Id,
        options: Dict,
        topic: String,
        payload: Payload,
    },
    Published {
        request: Id,
        publication: Id,
    },
    Subscribe {
        request: Id,
        options: Dict,
        topic: String,
    },
    Subscribed {
        request: Id,
        subscription: Id,
    },
    Unsubscribe {
        request: Id,
        subscription: Id,
    },
    Unsubscribed {
        request: Id,
    },
    Event {
        subscription: Id,
        publication: Id,
        details: Dict,
        payload: Payload,
    },
    Call {
        request: Id,
        options: Dict,
        procedure: String,
        payload: Payload,
    },
    Cancel {
        request: Id,
        options: Dict,
    },
    Result {
        request: Id,
        details: Dict,
        payload: Payload,
    },
    Register {
        request: Id,
        options: Dict,
        procedure: String,
    },
    Registered {
        request: Id,
        registration: Id,
    },
    Unregister {
        request: Id,
        registration: Id,
    },
    Unregistered {
        request: Id,
    },
    Invocation {
        request: Id,
        registration: Id,
        details: Dict,
        payload: Payload,
    },
    Interrupt {
        request: Id,
        options: Dict,
    },
    Yield {
        request: Id,
        options: Dict,
        payload: Payload,
    },
    /// A message whose tag is not a known kind, kept verbatim.
    Unknown {
        raw: Vec<Value>,
    },
}

impl Message {
    /// Builds an ERROR answering a request of the given kind.
    ///
    /// `Unknown` has no tag and maps to request type `0`.
    #[must_use]
    pub fn error(
        request_kind: MessageKind,
        request: Id,
        details: Dict,
        error: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self::Error {
            request_type: request_kind.tag().unwrap_or_default(),
            request,
            details,
            error: error.into(),
            payload,
        }
    }

    /// Decodes a raw array, defaulting anything absent or malformed.
    #[must_use]
    pub fn from_raw(raw: Vec<Value>) -> Self {
        decode_message(raw)
    }

    /// Encodes the message as its minimal positional array.
    #[must_use]
    pub fn to_raw(&self) -> Vec<Value> {
        encode_message(self)
    }

    /// The message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Hello { .. } => MessageKind::Hello,
            Self::Welcome { .. } => MessageKind::Welcome,
            Self::Abort { .. } => MessageKind::Abort,
            Self::Challenge { .. } => MessageKind::Challenge,
            Self::Authenticate { .. } => MessageKind::Authenticate,
            Self::Goodbye { .. } => MessageKind::Goodbye,
            Self::Error { .. } => MessageKind::Error,
            Self::Publish { .. } => MessageKind::Publish,
            Self::Published { .. } => MessageKind::Published,
            Self::Subscribe { .. } => MessageKind::Subscribe,
            Self::Subscribed { .. } => MessageKind::Subscribed,
            Self::Unsubscribe { .. } => MessageKind::Unsubscribe,
            Self::Unsubscribed { .. } => MessageKind::Unsubscribed,
            Self::Event { .. } => MessageKind::Event,
            Self::Call { .. } => MessageKind::Call,
            Self::Cancel { .. } => MessageKind::Cancel,
            Self::Result { .. } => MessageKind::Result,
            Self::Register { .. } => MessageKind::Register,
            Self::Registered { .. } => MessageKind::Registered,
            Self::Unregister { .. } => MessageKind::Unregister,
            Self::Unregistered { .. } => MessageKind::Unregistered,
            Self::Invocation { .. } => MessageKind::Invocation,
            Self::Interrupt { .. } => MessageKind::Interrupt,
            Self::Yield { .. } => MessageKind::Yield,
            Self::Unknown { .. } => MessageKind::Unknown,
        }
    }

    /// Wire tag. For `Unknown` this is the captured first element, if it is
    /// an unsigned integer.
    #[must_use]
    pub fn tag(&self) -> Option<u64> {
        match self {
            Self::Unknown { raw } => raw.first().and_then(Value::as_u64),
            other => other.kind().tag(),
        }
    }

    /// Kind of the request an ERROR answers; `None` for other messages.
    #[must_use]
    pub const fn request_kind(&self) -> Option<MessageKind> {
        match self {
            Self::Error { request_type, .. } => Some(MessageKind::from_tag(*request_type)),
            _ => None,
        }
    }

    /// Request ID used to correlate requests with their responses.
    ///
    /// EVENT and the session/handshake kinds carry none.
    #[must_use]
    pub const fn request_id(&self) -> Option<Id> {
        match self {
            Self::Error { request, .. }
            | Self::Publish { request, .. }
            | Self::Published { request, .. }
            | Self::Subscribe { request, .. }
            | Self::Subscribed { request, .. }
            | Self::Unsubscribe { request, .. }
            | Self::Unsubscribed { request }
            | Self::Call { request, .. }
            | Self::Cancel { request, .. }
            | Self::Result { request, .. }
            | Self::Register { request, .. }
            | Self::Registered { request, .. }
            | Self::Unregister { request, .. }
            | Self::Unregistered { request }
            | Self::Invocation { request, .. }
            | Self::Interrupt { request, .. }
            | Self::Yield { request, .. } => Some(*request),
            Self::Hello { .. }
            | Self::Welcome { .. }
            | Self::Abort { .. }
            | Self::Challenge { .. }
            | Self::Authenticate { .. }
            | Self::Goodbye { .. }
            | Self::Event { .. }
            | Self::Unknown { .. } => None,
        }
    }

    /// The details/options/extra dict, if the kind has one.
    #[must_use]
    pub const fn dict(&self) -> Option<&Dict> {
        match self {
            Self::Hello { details, .. }
            | Self::Welcome { details, .. }
            | Self::Abort { details, .. }
            | Self::Goodbye { details, .. }
            | Self::Error { details, .. }
            | Self::Event { details, .. }
            | Self::Result { details, .. }
            | Self::Invocation { details, .. } => Some(details),
            Self::Challenge { extra, .. } | Self::Authenticate { extra, .. } => Some(extra),
            Self::Publish { options, .. }
            | Self::Subscribe { options, .. }
            | Self::Call { options, .. }
            | Self::Cancel { options, .. }
            | Self::Register { options, .. }
            | Self::Interrupt { options, .. }
            | Self::Yield { options, .. } => Some(options),
            Self::Published { .. }
            | Self::Subscribed { .. }
            | Self::Unsubscribe { .. }
            | Self::Unsubscribed { .. }
            | Self::Registered { .. }
            | Self::Unregister { .. }
            | Self::Unregistered { .. }
            | Self::Unknown { .. } => None,
        }
    }

    /// The payload of a payload-carrying kind.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Error { payload, .. }
            | Self::Publish { payload, .. }
            | Self::Event { payload, .. }
            | Self::Call { payload, .. }
            | Self::Result { payload, .. }
            | Self::Invocation { payload, .. }
            | Self::Yield { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Mutable access to the payload of a payload-carrying kind.
    pub fn payload_mut(&mut self) -> Option<&mut Payload> {
        match self {
            Self::Error { payload, .. }
            | Self::Publish { payload, .. }
            | Self::Event { payload, .. }
            | Self::Call { payload, .. }
            | Self::Result { payload, .. }
            | Self::Invocation { payload, .. }
            | Self::Yield { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

impl From<Vec<Value>> for Message {
    fn from(raw: Vec<Value>) -> Self {
        decode_message(raw)
    }
}

impl From<&Message> for Vec<Value> {
    fn from(message: &Message) -> Self {
        encode_message(message)
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_message(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Value>::deserialize(deserializer).map(decode_message)
    }
}
