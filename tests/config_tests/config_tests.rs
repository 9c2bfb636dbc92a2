//! Config Tests
//!
//! Defaults, builder, validation and serde support.

use redpipe::{Config, ReadPolicy, RespError};

// =============================================================================
// Defaults and Builder
// =============================================================================

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 6379);
    assert_eq!(config.connect_timeout_ms, 0);
    assert_eq!(config.send_timeout_ms, 0);
    assert_eq!(config.read_timeout_ms, 0);
    assert!(config.nodelay);
    assert_eq!(config.read_buffer_size, 4096);
    assert_eq!(config.write_buffer_size, 4096);
    assert_eq!(config.read_policy, ReadPolicy::FlushAll);
    assert_eq!(config.addr(), "localhost:6379");
}

#[test]
fn test_builder_overrides() {
    let config = Config::builder()
        .host("10.0.0.5")
        .port(7000)
        .connect_timeout_ms(250)
        .send_timeout_ms(500)
        .read_timeout_ms(1000)
        .nodelay(false)
        .read_buffer_size(64 * 1024)
        .write_buffer_size(16 * 1024)
        .read_policy(ReadPolicy::FlushExact)
        .build();

    assert_eq!(config.addr(), "10.0.0.5:7000");
    assert_eq!(config.connect_timeout_ms, 250);
    assert_eq!(config.send_timeout_ms, 500);
    assert_eq!(config.read_timeout_ms, 1000);
    assert!(!config.nodelay);
    assert_eq!(config.read_buffer_size, 65536);
    assert_eq!(config.write_buffer_size, 16384);
    assert_eq!(config.read_policy, ReadPolicy::FlushExact);
}

#[test]
fn test_flush_all_on_read_flag() {
    let exact = Config::builder().flush_all_on_read(false).build();
    assert_eq!(exact.read_policy, ReadPolicy::FlushExact);
    assert!(!exact.read_policy.flushes_all());

    let all = Config::builder().flush_all_on_read(true).build();
    assert!(all.read_policy.flushes_all());
    assert_eq!(ReadPolicy::from_flush_all(true), ReadPolicy::FlushAll);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_unusable_settings() {
    let cases = [
        Config::builder().host("").build(),
        Config::builder().port(0).build(),
        Config::builder().read_buffer_size(0).build(),
        Config::builder().write_buffer_size(0).build(),
    ];

    for config in cases {
        assert!(
            matches!(config.validate(), Err(RespError::Config(_))),
            "expected rejection of {:?}",
            config
        );
    }
}

// =============================================================================
// Serde
// =============================================================================

#[test]
fn test_json_roundtrip() {
    let config = Config::builder()
        .host("cache.internal")
        .read_policy(ReadPolicy::FlushExact)
        .build();

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"flush_exact\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_json_uses_defaults() {
    let parsed: Config = serde_json::from_str(r#"{"port": 6380, "read_policy": "flush_exact"}"#).unwrap();

    assert_eq!(parsed.port, 6380);
    assert_eq!(parsed.read_policy, ReadPolicy::FlushExact);
    assert_eq!(parsed.host, "localhost");
    assert_eq!(parsed.read_buffer_size, 4096);
}
