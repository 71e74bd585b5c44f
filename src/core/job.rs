//! Job entity and its status state machine.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::clock::elapsed_between;

/// Opaque job identifier. A nil id means "not yet assigned".
pub type JobId = Uuid;

/// Lifecycle status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting to be dispatched.
    Pending,
    /// Handler is running.
    Processing,
    /// Handler is running but the queue is globally paused.
    Paused,
    /// Handler reported success.
    Completed,
    /// Handler reported failure.
    Failed,
    /// Cancelled before or during processing.
    Cancelled,
}

impl JobStatus {
    /// Completed, failed or cancelled.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Processing or paused, i.e. an attempt is in flight.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Processing | Self::Paused)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// `Paused` is a sub-state of a running attempt, so it may finish the
    /// attempt through the same edges as `Processing`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        use JobStatus::{Cancelled, Completed, Failed, Paused, Pending, Processing};
        matches!(
            (self, next),
            (Pending, Processing | Cancelled)
                | (Processing, Paused | Completed | Failed | Cancelled)
                | (Paused, Processing | Completed | Failed | Cancelled)
                | (Failed | Cancelled, Pending)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Job priority in `[1, 5]`; 1 is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    /// Most urgent.
    pub const HIGHEST: Self = Self(1);
    /// Least urgent.
    pub const LOWEST: Self = Self(5);
    /// Default for new jobs.
    pub const NORMAL: Self = Self(3);

    /// Build a priority, clamping into `[1, 5]`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let v = value.clamp(i64::from(Self::HIGHEST.0), i64::from(Self::LOWEST.0));
        // In range 1..=5 after the clamp.
        Self(u8::try_from(v).unwrap_or(Self::NORMAL.0))
    }

    /// Raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

/// One transcoding request tracked by the scheduler.
///
/// Status, progress and timestamps are owned by the scheduler; callers read them
/// through getters on snapshot copies and change them only via scheduler operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    file_path: PathBuf,
    file_size_bytes: u64,
    status: JobStatus,
    progress: u8,
    priority: Priority,
    is_starred: bool,
    added_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    error_message: Option<String>,
    output_file_size_bytes: Option<u64>,
}

impl Job {
    /// Create a new job for an input file. The id is assigned when the job is added.
    pub fn new(file_path: impl Into<PathBuf>, file_size_bytes: u64) -> Self {
        Self {
            id: Uuid::nil(),
            file_path: file_path.into(),
            file_size_bytes,
            status: JobStatus::Pending,
            progress: 0,
            priority: Priority::default(),
            is_starred: false,
            added_at: None,
            started_at: None,
            completed_at: None,
            error_message: None,
            output_file_size_bytes: None,
        }
    }

    /// Request a specific id. Ignored if it collides with a live job.
    #[must_use]
    pub const fn with_id(mut self, id: JobId) -> Self {
        self.id = id;
        self
    }

    /// Set the initial priority (clamped).
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Priority::clamped(priority);
        self
    }

    /// Mark the job starred.
    #[must_use]
    pub const fn starred(mut self, starred: bool) -> Self {
        self.is_starred = starred;
        self
    }

    /// Identifier; nil until added.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Input file path.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Input file size.
    #[must_use]
    pub const fn file_size_bytes(&self) -> u64 {
        self.file_size_bytes
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Progress percentage of the current attempt.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Current priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Whether the job is starred.
    #[must_use]
    pub const fn is_starred(&self) -> bool {
        self.is_starred
    }

    /// When the job was added.
    #[must_use]
    pub const fn added_at(&self) -> Option<DateTime<Utc>> {
        self.added_at
    }

    /// When the current attempt entered `Processing`.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// When the job reached a terminal status.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Failure reason of the last attempt.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Output size, set only on success.
    #[must_use]
    pub const fn output_file_size_bytes(&self) -> Option<u64> {
        self.output_file_size_bytes
    }

    /// `completed_at - started_at` when both are set.
    #[must_use]
    pub fn conversion_duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => elapsed_between(start, end),
            _ => None,
        }
    }

    /// Time since the current attempt started.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.started_at.and_then(|start| elapsed_between(start, now))
    }

    pub(crate) fn set_id(&mut self, id: JobId) {
        self.id = id;
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) fn toggle_starred(&mut self) -> bool {
        self.is_starred = !self.is_starred;
        self.is_starred
    }

    /// Reset to a fresh `Pending` entry stamped with `now`.
    pub(crate) fn admit(&mut self, now: DateTime<Utc>) {
        self.status = JobStatus::Pending;
        self.added_at = Some(now);
        self.reset_attempt();
    }

    fn reset_attempt(&mut self) {
        self.progress = 0;
        self.started_at = None;
        self.completed_at = None;
        self.error_message = None;
        self.output_file_size_bytes = None;
    }

    fn transition(&mut self, next: JobStatus) -> bool {
        if !self.status.can_transition_to(next) {
            tracing::trace!(job_id = %self.id, from = %self.status, to = %next, "rejected transition");
            return false;
        }
        self.status = next;
        true
    }

    /// `Pending -> Processing`, stamping `started_at`.
    pub(crate) fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != JobStatus::Pending || !self.transition(JobStatus::Processing) {
            return false;
        }
        self.progress = 0;
        self.started_at = Some(now);
        self.completed_at = None;
        true
    }

    /// `Processing -> Paused`.
    pub(crate) fn pause(&mut self) -> bool {
        self.status == JobStatus::Processing && self.transition(JobStatus::Paused)
    }

    /// `Paused -> Processing`.
    pub(crate) fn resume(&mut self) -> bool {
        self.status == JobStatus::Paused && self.transition(JobStatus::Processing)
    }

    pub(crate) fn complete(&mut self, now: DateTime<Utc>, output_size: Option<u64>) -> bool {
        if !self.status.is_active() || !self.transition(JobStatus::Completed) {
            return false;
        }
        self.progress = 100;
        self.completed_at = Some(now);
        self.output_file_size_bytes = output_size;
        true
    }

    pub(crate) fn fail(&mut self, now: DateTime<Utc>, message: String) -> bool {
        if !self.status.is_active() || !self.transition(JobStatus::Failed) {
            return false;
        }
        self.completed_at = Some(now);
        self.error_message = Some(message);
        true
    }

    pub(crate) fn cancel(&mut self, now: DateTime<Utc>) -> bool {
        if !self.transition(JobStatus::Cancelled) {
            return false;
        }
        self.completed_at = Some(now);
        true
    }

    /// `Failed | Cancelled -> Pending`, clearing the previous attempt.
    pub(crate) fn retry(&mut self) -> bool {
        if !self.status.is_terminal() || !self.transition(JobStatus::Pending) {
            return false;
        }
        self.reset_attempt();
        true
    }

    /// Record progress for the in-flight attempt. Clamps to `[0, 100]` and never
    /// moves backwards. Returns whether the stored value changed.
    pub(crate) fn record_progress(&mut self, percent: i64) -> bool {
        if !self.status.is_active() {
            return false;
        }
        let clamped = u8::try_from(percent.clamp(0, 100)).unwrap_or(100);
        if clamped <= self.progress {
            return false;
        }
        self.progress = clamped;
        true
    }
}
