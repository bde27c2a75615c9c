//! Typed WAMP messages and their positional array wire encoding.
//!
//! A WAMP message travels as an array whose first element is an integer tag
//! followed by a kind-specific, fixed sequence of fields. Payload kinds may
//! end with optional positional (`args`) and keyword (`kwargs`) arguments.
//! This crate maps those arrays to [`Message`] and back. It does not know
//! about transports, sessions, or routing.
//!
//! # Design Principles
//!
//! - **Single source of truth** - Each kind's slot layout lives in
//!   [`MessageKind::layout`]; the decoder and encoder both step through it.
//! - **Total decoding** - [`decode_message`] never fails. Unknown tags are
//!   preserved verbatim, absent dicts and payloads are defaulted.
//! - **Minimal encoding** - Trailing payload slots are emitted only when
//!   needed, via one shared [`normalize_trailing_payload`].
//! - **Structure, not semantics** - URIs, option keys and numeric ranges are
//!   not validated. [`try_decode_message`] only adds structural checks.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wire::{decode_message, encode_message, Message};
//!
//! let raw = vec![json!(48), json!(7), json!({}), json!("com.example.add"), json!([2, 3])];
//! let msg = decode_message(raw.clone());
//! assert!(matches!(msg, Message::Call { request: 7, .. }));
//! assert_eq!(encode_message(&msg), raw);
//! ```

mod decode;
mod encode;
mod error;
mod field;
mod kind;
mod message;
mod payload;

pub use decode::{decode_message, try_decode_message};
pub use encode::encode_message;
pub use error::{DecodeError, WireResult};
pub use field::{FieldRole, FieldShape};
pub use kind::MessageKind;
pub use message::Message;
pub use payload::{normalize_trailing_payload, Payload};

/// A WAMP ID (request, session, subscription, registration, publication).
pub type Id = u64;

/// A string-keyed dictionary as it appears on the wire.
pub type Dict = serde_json::Map<String, serde_json::Value>;

/// An ordered list as it appears on the wire.
pub type List = Vec<serde_json::Value>;
