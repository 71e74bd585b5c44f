//! Tests for shared utilities

use prometheus_transcode_queue::util::{bytes_to_mb, elapsed_between, init_test_tracing, now};
use std::time::Duration;

#[test]
fn test_bytes_to_mb() {
    assert!((bytes_to_mb(1024 * 1024) - 1.0).abs() < f64::EPSILON);
    assert!((bytes_to_mb(0)).abs() < f64::EPSILON);
    assert!((bytes_to_mb(512 * 1024) - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_elapsed_between_rejects_reversed() {
    let start = now();
    let end = start + chrono::Duration::milliseconds(1500);
    assert_eq!(elapsed_between(start, end), Some(Duration::from_millis(1500)));
    assert_eq!(elapsed_between(end, start), None);
}

#[test]
fn test_init_test_tracing_is_idempotent() {
    init_test_tracing();
    init_test_tracing();
    tracing::info!("tracing initialised twice without panicking");
}
