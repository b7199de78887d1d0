//! Unit tests for transport configuration parsing

use appinit_domain::error::Error;
use appinit_infrastructure::transport::TransportConfig;
use serde_json::json;
use std::time::Duration;

#[test]
fn test_parse_inbounds_and_outbounds() {
    let config = TransportConfig::from_value(&json!({
        "inbounds": [{ "address": "127.0.0.1:8086" }],
        "outbounds": {
            "hello": { "address": "127.0.0.1:8086", "timeout_ms": 1000 }
        }
    }))
    .unwrap();

    assert_eq!(config.inbound_addrs().unwrap()[0].port(), 8086);
    assert_eq!(config.outbounds["hello"].timeout(), Duration::from_secs(1));
}

#[test]
fn test_unknown_fields_are_rejected() {
    let result = TransportConfig::from_value(&json!({
        "inbounds": [],
        "middleware": ["auth"]
    }));
    assert!(matches!(result, Err(Error::Transport { .. })));
}

#[test]
fn test_bad_inbound_address_is_rejected() {
    let result = TransportConfig::from_value(&json!({
        "inbounds": [{ "address": ":8086" }]
    }));
    match result {
        Err(err @ Error::Transport { .. }) => assert!(err.to_string().contains(":8086")),
        other => panic!("Expected Transport error, got {other:?}"),
    }
}

#[test]
fn test_empty_outbound_address_is_rejected() {
    let result = TransportConfig::from_value(&json!({
        "outbounds": { "hello": { "address": "" } }
    }));
    assert!(matches!(result, Err(Error::Transport { .. })));
}

#[test]
fn test_section_must_be_an_object() {
    let result = TransportConfig::from_value(&json!(["127.0.0.1:8086"]));
    assert!(matches!(result, Err(Error::Transport { .. })));
}

#[test]
fn test_builder_helpers() {
    let config = TransportConfig::default()
        .with_inbound("127.0.0.1:0")
        .with_outbound("self", "127.0.0.1:9");
    config.validate().unwrap();
    assert_eq!(config.inbounds.len(), 1);
    assert!(config.outbounds.contains_key("self"));
}
