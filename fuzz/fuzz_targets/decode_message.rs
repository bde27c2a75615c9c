#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use wire::{decode_message, encode_message, try_decode_message};

fuzz_target!(|data: &[u8]| {
    let Ok(Value::Array(raw)) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let strict = try_decode_message(raw.clone());
    let msg = decode_message(raw);
    if let Ok(strict) = &strict {
        assert_eq!(strict, &msg);
    }

    // The minimal encoding of anything decoded is strictly valid and stable.
    let encoded = encode_message(&msg);
    if msg.kind().is_known() {
        let again = try_decode_message(encoded.clone()).expect("re-encoded message is valid");
        assert_eq!(encode_message(&again), encoded);
    }

    let _ = schema::unrecognized_keys(&msg);
    let _ = schema::validate_options(&msg);
});
