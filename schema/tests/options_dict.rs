use proptest::prelude::*;
use schema::{
    uri, validate_options, CallOptions, CancelMode, CancelOptions, HelloDetails, MessageOptions,
    PublishOptions,
};
use serde_json::{json, Value};
use wire::{decode_message, encode_message, Dict, Message};

fn dict(value: Value) -> Dict {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn decode(value: Value) -> Message {
    match value {
        Value::Array(items) => decode_message(items),
        other => panic!("expected array, got {other}"),
    }
}

#[test]
fn typed_call_options_survive_the_wire() {
    let options = CallOptions {
        disclose_me: Some(true),
        timeout: Some(-55),
        ..CallOptions::default()
    };
    let msg = Message::Call {
        request: 123,
        options: options.to_dict().unwrap(),
        procedure: "test".into(),
        payload: wire::Payload::from_args(vec![json!(123)]),
    };
    let raw = encode_message(&msg);
    assert_eq!(
        Value::Array(raw.clone()),
        json!([48, 123, {"disclose_me": true, "timeout": -55}, "test", [123]])
    );

    let Message::Call { options: back, .. } = decode_message(raw) else {
        panic!("expected CALL");
    };
    assert_eq!(CallOptions::from_dict(&back).unwrap(), options);
}

#[test]
fn publish_blackwhite_listing() {
    let msg = decode(json!([16, 239714735, {
        "exclude": [7891255, 1245751],
        "eligible_authrole": ["admin"],
        "acknowledge": true
    }, "com.myapp.mytopic1", ["Hello, world!"]]));
    validate_options(&msg).unwrap();

    let options = PublishOptions::from_dict(msg.dict().unwrap()).unwrap();
    assert_eq!(options.exclude, Some(vec![7891255, 1245751]));
    assert_eq!(options.eligible_authrole, Some(vec!["admin".to_string()]));
    assert_eq!(options.acknowledge, Some(true));
}

#[test]
fn cancel_mode_on_the_wire() {
    let msg = decode(json!([49, 7814135, {"mode": "killnowait"}]));
    let options = CancelOptions::from_dict(msg.dict().unwrap()).unwrap();
    assert_eq!(options.mode, Some(CancelMode::KillNoWait));
}

#[test]
fn hello_details_from_handshake() {
    let msg = decode(json!([1, "realm1", {
        "agent": "client/2.0",
        "authmethods": ["wampcra", "anonymous"],
        "roles": {"caller": {"features": {"progressive_call_results": true}}}
    }]));
    let details = HelloDetails::from_dict(msg.dict().unwrap()).unwrap();
    assert_eq!(details.agent.as_deref(), Some("client/2.0"));
    assert_eq!(details.authmethods.as_ref().map(Vec::len), Some(2));
    let caller = details
        .roles
        .and_then(|roles| roles.caller)
        .and_then(|role| role.features)
        .unwrap();
    assert_eq!(caller.progressive_call_results, Some(true));
}

#[test]
fn goodbye_reason_is_known() {
    let msg = decode(json!([6, {}, "wamp.close.close_realm"]));
    let Message::Goodbye { reason, .. } = msg else {
        panic!("expected GOODBYE");
    };
    assert_eq!(reason, uri::close::CLOSE_REALM);
    assert!(uri::is_known(&reason));
}

fn extra_strategy() -> impl Strategy<Value = Dict> {
    prop::collection::btree_map(
        "x_[a-z]{1,6}",
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ],
        0..4,
    )
    .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_unrecognized_keys_survive(
        extra in extra_strategy(),
        timeout in prop::option::of(any::<i64>()),
        disclose_me in prop::option::of(any::<bool>()),
    ) {
        let mut raw = extra.clone();
        if let Some(timeout) = timeout {
            raw.insert("timeout".into(), json!(timeout));
        }
        if let Some(disclose_me) = disclose_me {
            raw.insert("disclose_me".into(), json!(disclose_me));
        }

        let options = CallOptions::from_dict(&raw).unwrap();
        prop_assert_eq!(options.timeout, timeout);
        prop_assert_eq!(options.disclose_me, disclose_me);
        prop_assert_eq!(&options.extra, &extra);
        prop_assert_eq!(options.to_dict().unwrap(), raw.clone());
        prop_assert_eq!(CallOptions::unrecognized_keys(&raw).len(), extra.len());
    }
}
