//! Typed option dictionaries, role features and well-known URIs for WAMP.
//!
//! The `wire` crate keeps every dict slot as an untyped [`Dict`]. This crate
//! layers a static catalog on top:
//! - Typed options and details per message kind ([`MessageOptions`])
//! - Role feature flags announced in HELLO and WELCOME
//! - Reserved URIs for errors, close reasons and the meta APIs
//!
//! # Design Principles
//!
//! - **Key-preserving** - keys without a dedicated field are kept in `extra`;
//!   only a recognized key set to `null` is dropped as unset.
//! - **Opt-in** - decoding a message never consults this crate.
//! - **Plain tables** - URIs and feature keys are `&'static str` constants.
//!
//! # Example
//!
//! ```
//! use schema::{CallOptions, MessageOptions};
//! use wire::{decode_message, Message};
//!
//! let raw = serde_json::from_str(r#"[48, 1, {"timeout": 500, "x": 1}, "com.example.add"]"#).unwrap();
//! let Message::Call { options, .. } = decode_message(raw) else { unreachable!() };
//! let typed = CallOptions::from_dict(&options).unwrap();
//! assert_eq!(typed.timeout, Some(500));
//! assert_eq!(CallOptions::unrecognized_keys(&options), vec!["x"]);
//! ```

mod error;
mod options;
mod roles;
pub mod uri;

pub use error::{SchemaError, SchemaResult};
pub use options::{
    CallOptions, CancelMode, CancelOptions, EventDetails, InvocationDetails, InvocationPolicy,
    MatchPolicy, MessageOptions, PublishOptions, RegisterOptions, ResultDetails,
    SubscribeOptions, YieldOptions,
};
pub use roles::{
    feature, BrokerFeatures, CalleeFeatures, CallerFeatures, ClientRoles, DealerFeatures,
    HelloDetails, PublisherFeatures, Role, RouterRoles, SubscriberFeatures, WelcomeDetails,
};

use wire::{Dict, Message, MessageKind};

/// Recognized keys of the typed dict for `kind`, if the catalog has one.
#[must_use]
pub const fn known_keys(kind: MessageKind) -> Option<&'static [&'static str]> {
    match kind {
        MessageKind::Hello => Some(HelloDetails::KEYS),
        MessageKind::Welcome => Some(WelcomeDetails::KEYS),
        MessageKind::Publish => Some(PublishOptions::KEYS),
        MessageKind::Subscribe => Some(SubscribeOptions::KEYS),
        MessageKind::Call => Some(CallOptions::KEYS),
        MessageKind::Cancel => Some(CancelOptions::KEYS),
        MessageKind::Result => Some(ResultDetails::KEYS),
        MessageKind::Register => Some(RegisterOptions::KEYS),
        MessageKind::Event => Some(EventDetails::KEYS),
        MessageKind::Invocation => Some(InvocationDetails::KEYS),
        MessageKind::Yield => Some(YieldOptions::KEYS),
        _ => None,
    }
}

/// Keys of the message's options or details dict that the catalog does not
/// recognize. Empty for kinds without a typed dict.
#[must_use]
pub fn unrecognized_keys(msg: &Message) -> Vec<&str> {
    match (known_keys(msg.kind()), msg.dict()) {
        (Some(keys), Some(dict)) => options::keys_outside(dict, keys),
        _ => Vec::new(),
    }
}

/// Checks that the message's dict converts to its typed form.
pub fn validate_options(msg: &Message) -> SchemaResult<()> {
    let Some(dict) = msg.dict() else {
        return Ok(());
    };
    match msg.kind() {
        MessageKind::Hello => check::<HelloDetails>(dict),
        MessageKind::Welcome => check::<WelcomeDetails>(dict),
        MessageKind::Publish => check::<PublishOptions>(dict),
        MessageKind::Subscribe => check::<SubscribeOptions>(dict),
        MessageKind::Call => check::<CallOptions>(dict),
        MessageKind::Cancel => check::<CancelOptions>(dict),
        MessageKind::Result => check::<ResultDetails>(dict),
        MessageKind::Register => check::<RegisterOptions>(dict),
        MessageKind::Event => check::<EventDetails>(dict),
        MessageKind::Invocation => check::<InvocationDetails>(dict),
        MessageKind::Yield => check::<YieldOptions>(dict),
        _ => Ok(()),
    }
}

fn check<T: MessageOptions>(dict: &Dict) -> SchemaResult<()> {
    T::from_dict(dict).map(drop)
}
