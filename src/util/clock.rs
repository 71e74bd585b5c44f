//! Wall-clock helpers shared by the job model and statistics.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Bytes per megabyte used for throughput figures.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Current UTC timestamp.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Elapsed time between two timestamps, `None` if `end` precedes `start`.
#[must_use]
pub fn elapsed_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Duration> {
    (end - start).to_std().ok()
}

/// Convert a byte count to megabytes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}
