//! HELLO and WELCOME details with the role feature flags peers announce.

use serde::{Deserialize, Serialize};
use wire::{Dict, MessageKind};

use crate::options::MessageOptions;

/// Feature flag keys as they appear under `roles.<role>.features`.
pub mod feature {
    pub const CALL_CANCELING: &str = "call_canceling";
    pub const CALL_TIMEOUT: &str = "call_timeout";
    pub const CALL_TRUSTLEVELS: &str = "call_trustlevels";
    pub const CALLER_IDENTIFICATION: &str = "caller_identification";
    pub const EVENT_HISTORY: &str = "event_history";
    pub const PATTERN_BASED_REGISTRATION: &str = "pattern_based_registration";
    pub const PATTERN_BASED_SUBSCRIPTION: &str = "pattern_based_subscription";
    pub const PROGRESSIVE_CALL_RESULTS: &str = "progressive_call_results";
    pub const PUBLICATION_TRUSTLEVELS: &str = "publication_trustlevels";
    pub const PUBLISHER_EXCLUSION: &str = "publisher_exclusion";
    pub const PUBLISHER_IDENTIFICATION: &str = "publisher_identification";
    pub const REGISTRATION_META_API: &str = "registration_meta_api";
    pub const SESSION_META_API: &str = "session_meta_api";
    pub const SHARDED_REGISTRATION: &str = "sharded_registration";
    pub const SHARDED_SUBSCRIPTION: &str = "sharded_subscription";
    pub const SHARED_REGISTRATION: &str = "shared_registration";
    pub const SHAREDED_SUBSCRIPTIONS: &str = "shareded_subscriptions";
    pub const SUBSCRIBER_BLACKWHITE_LISTING: &str = "subscriber_blackwhite_listing";
    pub const SUBSCRIPTION_META_API: &str = "subscription_meta_api";

    /// Every feature key, sorted.
    pub const ALL: &[&str] = &[
        CALL_CANCELING,
        CALL_TIMEOUT,
        CALL_TRUSTLEVELS,
        CALLER_IDENTIFICATION,
        EVENT_HISTORY,
        PATTERN_BASED_REGISTRATION,
        PATTERN_BASED_SUBSCRIPTION,
        PROGRESSIVE_CALL_RESULTS,
        PUBLICATION_TRUSTLEVELS,
        PUBLISHER_EXCLUSION,
        PUBLISHER_IDENTIFICATION,
        REGISTRATION_META_API,
        SESSION_META_API,
        SHARDED_REGISTRATION,
        SHARDED_SUBSCRIPTION,
        SHARED_REGISTRATION,
        SHAREDED_SUBSCRIPTIONS,
        SUBSCRIBER_BLACKWHITE_LISTING,
        SUBSCRIPTION_META_API,
    ];

    /// Returns `true` if `key` is a known feature flag.
    #[must_use]
    pub fn is_known(key: &str) -> bool {
        ALL.binary_search(&key).is_ok()
    }
}

/// One announced role and its optional feature set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role<F> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<F>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl<F> Role<F> {
    /// A role announcing the given features.
    pub fn with_features(features: F) -> Self {
        Self {
            features: Some(features),
            extra: Dict::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_blackwhite_listing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_exclusion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_identification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharded_subscription: Option<bool>,
    /// Legacy spelling some peers still announce, kept as its own key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareded_subscriptions: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_based_subscription: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharded_subscription: Option<bool>,
    /// Legacy spelling some peers still announce, kept as its own key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareded_subscriptions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_identification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_trustlevels: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressive_call_results: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_timeout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_canceling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_identification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharded_registration: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalleeFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressive_call_results: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_trustlevels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_based_registration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_registration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_timeout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_canceling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_identification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharded_registration: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_meta_api: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_blackwhite_listing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_exclusion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_identification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_trustlevels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_based_subscription: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharded_subscription: Option<bool>,
    /// Legacy spelling some peers still announce, kept as its own key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareded_subscriptions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_meta_api: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_meta_api: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_registration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_meta_api: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressive_call_results: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_timeout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_canceling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_identification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_trustlevels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_based_registration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharded_registration: Option<bool>,
}

/// Roles a client announces in HELLO.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRoles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Role<PublisherFeatures>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<Role<SubscriberFeatures>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<Role<CallerFeatures>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callee: Option<Role<CalleeFeatures>>,
    #[serde(flatten)]
    pub extra: Dict,
}

/// Roles a router announces in WELCOME.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterRoles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker: Option<Role<BrokerFeatures>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer: Option<Role<DealerFeatures>>,
    #[serde(flatten)]
    pub extra: Dict,
}

/// Details of a HELLO.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HelloDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authmethods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authrole: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authextra: Option<Dict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<ClientRoles>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for HelloDetails {
    const KIND: MessageKind = MessageKind::Hello;
    const KEYS: &'static [&'static str] = &[
        "agent",
        "authmethods",
        "authid",
        "authrole",
        "authextra",
        "roles",
    ];
}

/// Details of a WELCOME.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WelcomeDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authrole: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authmethod: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authprovider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RouterRoles>,
    #[serde(flatten)]
    pub extra: Dict,
}

impl MessageOptions for WelcomeDetails {
    const KIND: MessageKind = MessageKind::Welcome;
    const KEYS: &'static [&'static str] = &[
        "agent",
        "authid",
        "authrole",
        "authmethod",
        "authprovider",
        "roles",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn dict(value: Value) -> Dict {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn feature_table_sorted() {
        assert!(feature::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(feature::is_known(feature::CALL_CANCELING));
        assert!(!feature::is_known("teleportation"));
    }

    #[test]
    fn hello_callee_features() {
        let raw = dict(json!({
            "roles": {"callee": {"features": {"call_canceling": true}}}
        }));
        let details = HelloDetails::from_dict(&raw).unwrap();
        let callee = details.roles.as_ref().and_then(|r| r.callee.as_ref()).unwrap();
        assert_eq!(
            callee.features.as_ref().and_then(|f| f.call_canceling),
            Some(true)
        );
        assert_eq!(details.to_dict().unwrap(), raw);
    }

    #[test]
    fn welcome_broker_features() {
        let details = WelcomeDetails {
            authid: Some("joe".into()),
            roles: Some(RouterRoles {
                broker: Some(Role::with_features(BrokerFeatures {
                    event_history: Some(true),
                    ..BrokerFeatures::default()
                })),
                ..RouterRoles::default()
            }),
            ..WelcomeDetails::default()
        };
        assert_eq!(
            details.to_dict().unwrap(),
            dict(json!({
                "authid": "joe",
                "roles": {"broker": {"features": {"event_history": true}}}
            }))
        );
    }

    #[test]
    fn both_sharding_spellings_are_kept() {
        let raw = dict(json!({
            "roles": {"broker": {"features": {
                "shareded_subscriptions": true,
                "sharded_subscription": false
            }}}
        }));
        let details = WelcomeDetails::from_dict(&raw).unwrap();
        let broker = details
            .roles
            .as_ref()
            .and_then(|r| r.broker.as_ref())
            .and_then(|r| r.features.as_ref())
            .unwrap();
        assert_eq!(broker.shareded_subscriptions, Some(true));
        assert_eq!(broker.sharded_subscription, Some(false));
        assert_eq!(details.to_dict().unwrap(), raw);
    }

    #[test]
    fn legacy_sharding_key_keeps_its_name() {
        let raw = dict(json!({
            "roles": {"subscriber": {"features": {"shareded_subscriptions": true}}}
        }));
        let details = HelloDetails::from_dict(&raw).unwrap();
        let subscriber = details
            .roles
            .as_ref()
            .and_then(|r| r.subscriber.as_ref())
            .and_then(|r| r.features.as_ref())
            .unwrap();
        assert_eq!(subscriber.shareded_subscriptions, Some(true));
        assert_eq!(subscriber.sharded_subscription, None);
        assert_eq!(details.to_dict().unwrap(), raw);
    }

    #[test]
    fn unknown_role_is_preserved() {
        let raw = dict(json!({
            "agent": "client/1.0",
            "roles": {"observer": {}}
        }));
        let details = HelloDetails::from_dict(&raw).unwrap();
        assert!(details
            .roles
            .as_ref()
            .is_some_and(|roles| roles.extra.contains_key("observer")));
        assert_eq!(details.to_dict().unwrap(), raw);
    }
}
