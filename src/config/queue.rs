//! Queue scheduler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Lowest accepted concurrency limit.
pub const MIN_CONCURRENT_LIMIT: usize = 1;
/// Highest accepted concurrency limit.
pub const MAX_CONCURRENT_LIMIT: usize = 8;

const DEFAULT_PAUSE_POLL_MS: u64 = 250;

/// Scheduler policies and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of jobs processed at once.
    pub max_concurrent: usize,
    /// Start a run automatically when jobs are added to an idle queue, and
    /// restart when pending jobs remain after a run.
    pub auto_start_next_item: bool,
    /// Stop the whole run when any job fails.
    pub stop_on_error: bool,
    /// Interval at which workers recheck the pause flag.
    pub pause_poll_interval_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_concurrent: Self::default_max_concurrent(),
            auto_start_next_item: false,
            stop_on_error: false,
            pause_poll_interval_ms: DEFAULT_PAUSE_POLL_MS,
        }
    }
}

impl QueueConfig {
    /// Half the logical CPUs, clamped into the accepted range.
    #[must_use]
    pub fn default_max_concurrent() -> usize {
        Self::clamp_concurrency(num_cpus::get() / 2)
    }

    /// Clamp a requested concurrency into `[MIN_CONCURRENT_LIMIT, MAX_CONCURRENT_LIMIT]`.
    #[must_use]
    pub fn clamp_concurrency(value: usize) -> usize {
        value.clamp(MIN_CONCURRENT_LIMIT, MAX_CONCURRENT_LIMIT)
    }

    /// Set the concurrency limit (clamped).
    #[must_use]
    pub fn with_max_concurrent(mut self, value: usize) -> Self {
        self.max_concurrent = Self::clamp_concurrency(value);
        self
    }

    /// Set the auto-start policy.
    #[must_use]
    pub const fn with_auto_start_next_item(mut self, enabled: bool) -> Self {
        self.auto_start_next_item = enabled;
        self
    }

    /// Set the stop-on-error policy.
    #[must_use]
    pub const fn with_stop_on_error(mut self, enabled: bool) -> Self {
        self.stop_on_error = enabled;
        self
    }

    /// Set the pause poll interval in milliseconds.
    #[must_use]
    pub const fn with_pause_poll_interval_ms(mut self, ms: u64) -> Self {
        self.pause_poll_interval_ms = ms;
        self
    }

    /// Pause poll interval as a `Duration`.
    #[must_use]
    pub const fn pause_poll_interval(&self) -> Duration {
        Duration::from_millis(self.pause_poll_interval_ms)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CONCURRENT_LIMIT..=MAX_CONCURRENT_LIMIT).contains(&self.max_concurrent) {
            return Err(format!(
                "max_concurrent must be between {MIN_CONCURRENT_LIMIT} and {MAX_CONCURRENT_LIMIT}, got {}",
                self.max_concurrent
            ));
        }
        if self.pause_poll_interval_ms == 0 {
            return Err("pause_poll_interval_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment, reading a `.env` file first if present.
    ///
    /// Recognised variables: `QUEUE_MAX_CONCURRENT`, `QUEUE_AUTO_START`,
    /// `QUEUE_STOP_ON_ERROR`, `QUEUE_PAUSE_POLL_MS`. Unset or unparsable values fall
    /// back to defaults.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let cfg = Self {
            max_concurrent: env_parse("QUEUE_MAX_CONCURRENT")
                .map_or(defaults.max_concurrent, Self::clamp_concurrency),
            auto_start_next_item: env_parse("QUEUE_AUTO_START")
                .unwrap_or(defaults.auto_start_next_item),
            stop_on_error: env_parse("QUEUE_STOP_ON_ERROR").unwrap_or(defaults.stop_on_error),
            pause_poll_interval_ms: env_parse("QUEUE_PAUSE_POLL_MS")
                .unwrap_or(defaults.pause_poll_interval_ms),
        };
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
