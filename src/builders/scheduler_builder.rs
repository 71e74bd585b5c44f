//! Builder composing a [`Scheduler`] from a handler, configuration and runtime.

use std::sync::Arc;

use crate::config::QueueConfig;
use crate::core::{JobHandler, QueueError, Scheduler};
use crate::runtime::TokioSpawner;

/// Step-by-step construction of a [`Scheduler`].
pub struct SchedulerBuilder {
    handler: Arc<dyn JobHandler>,
    config: QueueConfig,
    spawner: Option<TokioSpawner>,
}

impl SchedulerBuilder {
    /// Start from a handler and default configuration.
    pub fn new(handler: impl JobHandler) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    /// Start from a shared handler.
    #[must_use]
    pub fn from_arc(handler: Arc<dyn JobHandler>) -> Self {
        Self {
            handler,
            config: QueueConfig::default(),
            spawner: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: QueueConfig) -> Self {
        self.config = config;
        self
    }

    /// Concurrency limit (clamped into `[1, 8]`).
    #[must_use]
    pub fn max_concurrent(mut self, value: usize) -> Self {
        self.config = self.config.with_max_concurrent(value);
        self
    }

    /// Auto-start policy.
    #[must_use]
    pub fn auto_start_next_item(mut self, enabled: bool) -> Self {
        self.config = self.config.with_auto_start_next_item(enabled);
        self
    }

    /// Stop-on-error policy.
    #[must_use]
    pub fn stop_on_error(mut self, enabled: bool) -> Self {
        self.config = self.config.with_stop_on_error(enabled);
        self
    }

    /// Pause poll interval in milliseconds.
    #[must_use]
    pub fn pause_poll_interval_ms(mut self, ms: u64) -> Self {
        self.config = self.config.with_pause_poll_interval_ms(ms);
        self
    }

    /// Run background work on a specific runtime instead of the current one.
    #[must_use]
    pub fn spawner(mut self, spawner: TokioSpawner) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Configuration as it stands.
    #[must_use]
    pub const fn current_config(&self) -> &QueueConfig {
        &self.config
    }

    /// Build the scheduler.
    ///
    /// # Errors
    ///
    /// [`QueueError::Config`] if the configuration is invalid after clamping,
    /// [`QueueError::NoRuntime`] if no spawner was given and the caller is not
    /// inside a tokio runtime.
    pub fn build(self) -> Result<Scheduler, QueueError> {
        let mut config = self.config;
        config.max_concurrent = QueueConfig::clamp_concurrency(config.max_concurrent);
        config.validate().map_err(QueueError::Config)?;
        let spawner = match self.spawner {
            Some(spawner) => spawner,
            None => TokioSpawner::try_current().ok_or(QueueError::NoRuntime)?,
        };
        Ok(Scheduler::from_parts(&config, self.handler, spawner))
    }
}

impl std::fmt::Debug for SchedulerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerBuilder")
            .field("config", &self.config)
            .field("spawner", &self.spawner)
            .finish_non_exhaustive()
    }
}
