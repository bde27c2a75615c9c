//! Typed option and detail dictionaries per message kind.
//!
//! Every struct mirrors the recognized keys of one kind's dict slot. All
//! fields are optional and keys the struct does not know are kept in
//! `extra`, so converting a wire dict to a typed value and back keeps every
//! key. The one exception is a recognized key set to `null`: it reads as
//! unset and is omitted on the way back.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wire::{Dict, Id, MessageKind};

use crate::error::{SchemaError, SchemaResult};

/// Conversion between a typed options struct and its wire dict.
pub trait MessageOptions: Serialize + DeserializeOwned + Default {
    /// The message kind whose dict slot this type describes.
    const KIND: MessageKind;

    /// Keys with a dedicated field.
    const KEYS: &'static [&'static str];

    /// Parses a wire dict. Unrecognized keys land in `extra`.
    fn from_dict(dict: &Dict) -> SchemaResult<Self> {
        serde_json::from_value(Value::Object(dict.clone())).map_err(|err| {
            SchemaError::InvalidOptions {
                kind: Self::KIND,
                reason: err.to_string(),
            }
        })
    }

    /// Builds the wire dict, omitting unset fields.
    fn to_dict(&self) -> SchemaResult<Dict> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SchemaError::NotADict { kind: Self::KIND }),
            Err(err) => Err(SchemaError::InvalidOptions {
                kind: Self::KIND,
                reason: err.to_string(),
            }),
        }
    }

    /// Keys of `dict` this type has no dedicated field for.
    fn unrecognized_keys(dict: &Dict) -> Vec<&str> {
        keys_outside(dict, Self::KEYS)
    }
}

/// Keys of `dict` not listed in `known`, in dict order.
pub(crate) fn keys_outside<'a>(dict: &'a Dict, known: &[&str]) -> Vec<&'a str> {
    dict.keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect()
}

/// How a pattern-based subscription or registration matches URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    Exact,
    Prefix,
    Wildcard,
}

/// How a dealer picks a callee among shared registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationPolicy {
    Single,
    RoundRobin,
    Random,
    First,
    Last,
}

/// How a call is cancelled and whether the caller waits for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelMode {
    /// Stop waiting for the result; the callee is not interrupted.
    Skip,
    /// Interrupt the callee and wait for it to acknowledge.
    Kill,
    /// Interrupt the callee and return immediately.
    KillNoWait,
}

impl MatchPolicy {
    /// Wire value of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Wildcard => "wildcard",
        }
    }
}

impl InvocationPolicy {
    /// Wire value of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::RoundRobin => "roundrobin",
            Self::Random => "random",
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

impl CancelMode {
    /// Wire value of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Kill => "kill",
            Self::KillNoWait => "killnowait",
        }
    }
}

/// Options of a CALL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Caller accepts progressive results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_progress: Option<bool>,
    /// Ask the dealer to disclose the caller's session to the callee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclose_me: Option<bool>,
    /// Milliseconds after which the call is cancelled. Kept as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for CallOptions {
    const KIND: MessageKind = MessageKind::Call;
    const KEYS: &'static [&'static str] = &["receive_progress", "disclose_me", "timeout"];
}

/// Options of a PUBLISH.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishOptions {
    /// Ask the broker for a PUBLISHED acknowledgement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledge: Option<bool>,
    /// Sessions that must not receive the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<Id>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_authid: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_authrole: Option<Vec<String>>,
    /// Only these sessions may receive the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible: Option<Vec<Id>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible_authid: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible_authrole: Option<Vec<String>>,
    /// `Some(false)` delivers the event back to the publisher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_me: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclose_me: Option<bool>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for PublishOptions {
    const KIND: MessageKind = MessageKind::Publish;
    const KEYS: &'static [&'static str] = &[
        "acknowledge",
        "exclude",
        "exclude_authid",
        "exclude_authrole",
        "eligible",
        "eligible_authid",
        "eligible_authrole",
        "exclude_me",
        "disclose_me",
    ];
}

/// Options of a SUBSCRIBE.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscribeOptions {
    #[serde(
        rename = "match",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub match_policy: Option<MatchPolicy>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for SubscribeOptions {
    const KIND: MessageKind = MessageKind::Subscribe;
    const KEYS: &'static [&'static str] = &["match"];
}

/// Options of a REGISTER.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterOptions {
    /// Ask the dealer to disclose caller sessions in INVOCATION details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclose_caller: Option<bool>,
    #[serde(
        rename = "match",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub match_policy: Option<MatchPolicy>,
    /// Enables shared registration with the given policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoke: Option<InvocationPolicy>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for RegisterOptions {
    const KIND: MessageKind = MessageKind::Register;
    const KEYS: &'static [&'static str] = &["disclose_caller", "match", "invoke"];
}

/// Options of a CANCEL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<CancelMode>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for CancelOptions {
    const KIND: MessageKind = MessageKind::Cancel;
    const KEYS: &'static [&'static str] = &["mode"];
}

/// Options of a YIELD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YieldOptions {
    /// This YIELD is a progressive result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for YieldOptions {
    const KIND: MessageKind = MessageKind::Yield;
    const KEYS: &'static [&'static str] = &["progress"];
}

/// Details of a RESULT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDetails {
    /// This RESULT is a progressive result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for ResultDetails {
    const KIND: MessageKind = MessageKind::Result;
    const KEYS: &'static [&'static str] = &["progress"];
}

/// Details of an EVENT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Publisher session, when disclosed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trustlevel: Option<u64>,
    /// Concrete topic, sent for pattern-based subscriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for EventDetails {
    const KIND: MessageKind = MessageKind::Event;
    const KEYS: &'static [&'static str] = &["publisher", "trustlevel", "topic"];
}

/// Details of an INVOCATION.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_progress: Option<bool>,
    /// Caller session, when disclosed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trustlevel: Option<u64>,
    /// Concrete procedure, sent for pattern-based registrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for InvocationDetails {
    const KIND: MessageKind = MessageKind::Invocation;
    const KEYS: &'static [&'static str] = &[
        "receive_progress",
        "caller",
        "trustlevel",
        "procedure",
        "timeout",
    ];
}
