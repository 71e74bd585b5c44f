//! Tests for configuration validation

use prometheus_transcode_queue::config::{QueueConfig, MAX_CONCURRENT_LIMIT, MIN_CONCURRENT_LIMIT};
use std::time::Duration;

#[test]
fn test_queue_config_defaults() {
    let config = QueueConfig::default();
    assert!(config.validate().is_ok());
    assert!((MIN_CONCURRENT_LIMIT..=MAX_CONCURRENT_LIMIT).contains(&config.max_concurrent));
    assert!(!config.auto_start_next_item);
    assert!(!config.stop_on_error);
    assert_eq!(config.pause_poll_interval(), Duration::from_millis(250));
}

#[test]
fn test_default_max_concurrent_is_clamped() {
    let value = QueueConfig::default_max_concurrent();
    assert!(value >= MIN_CONCURRENT_LIMIT);
    assert!(value <= MAX_CONCURRENT_LIMIT);
}

#[test]
fn test_with_max_concurrent_clamps() {
    assert_eq!(QueueConfig::default().with_max_concurrent(0).max_concurrent, 1);
    assert_eq!(QueueConfig::default().with_max_concurrent(64).max_concurrent, 8);
    assert_eq!(QueueConfig::default().with_max_concurrent(3).max_concurrent, 3);
}

#[test]
fn test_queue_config_invalid_max_concurrent() {
    let invalid = QueueConfig {
        max_concurrent: 0,
        ..QueueConfig::default()
    };
    assert!(invalid.validate().is_err());

    let invalid = QueueConfig {
        max_concurrent: 9,
        ..QueueConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_queue_config_invalid_poll_interval() {
    let invalid = QueueConfig::default().with_pause_poll_interval_ms(0);
    let err = invalid.validate().unwrap_err();
    assert!(err.contains("pause_poll_interval_ms"));
}

#[test]
fn test_queue_config_from_json() {
    let config = QueueConfig::from_json_str(
        r#"{"max_concurrent": 4, "auto_start_next_item": true, "stop_on_error": true}"#,
    )
    .unwrap();
    assert_eq!(config.max_concurrent, 4);
    assert!(config.auto_start_next_item);
    assert!(config.stop_on_error);
    // Missing fields fall back to defaults.
    assert_eq!(config.pause_poll_interval_ms, 250);
}

#[test]
fn test_queue_config_from_json_rejects_out_of_range() {
    let err = QueueConfig::from_json_str(r#"{"max_concurrent": 12}"#).unwrap_err();
    assert!(err.contains("max_concurrent"));
    let err = QueueConfig::from_json_str("{not json").unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_queue_config_serde_shape() {
    let config = QueueConfig::default()
        .with_max_concurrent(2)
        .with_stop_on_error(true);
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["max_concurrent"], 2);
    assert_eq!(value["stop_on_error"], true);
    assert_eq!(value["auto_start_next_item"], false);
}

#[test]
fn test_queue_config_from_env() {
    std::env::set_var("QUEUE_MAX_CONCURRENT", "20");
    std::env::set_var("QUEUE_AUTO_START", "true");
    std::env::set_var("QUEUE_STOP_ON_ERROR", "not-a-bool");
    std::env::set_var("QUEUE_PAUSE_POLL_MS", "40");

    let config = QueueConfig::from_env().unwrap();

    std::env::remove_var("QUEUE_MAX_CONCURRENT");
    std::env::remove_var("QUEUE_AUTO_START");
    std::env::remove_var("QUEUE_STOP_ON_ERROR");
    std::env::remove_var("QUEUE_PAUSE_POLL_MS");

    assert_eq!(config.max_concurrent, MAX_CONCURRENT_LIMIT);
    assert!(config.auto_start_next_item);
    assert!(!config.stop_on_error);
    assert_eq!(config.pause_poll_interval_ms, 40);
}
