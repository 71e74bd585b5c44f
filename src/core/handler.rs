//! Job handler abstraction and the progress sink handed to it.

use std::future::Future;
use std::sync::Weak;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::scheduler::Shared;
use super::{HandlerError, Job, JobId, QueueEvent};

/// Result reported by a handler that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// Whether the job succeeded.
    pub success: bool,
    /// Size of the produced output, if any.
    pub output_size: Option<u64>,
    /// Failure reason when `success` is false.
    pub error_message: Option<String>,
}

impl JobOutcome {
    /// Successful outcome.
    #[must_use]
    pub const fn succeeded(output_size: Option<u64>) -> Self {
        Self {
            success: true,
            output_size,
            error_message: None,
        }
    }

    /// Failed outcome with a reason.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output_size: None,
            error_message: Some(message.into()),
        }
    }
}

/// Performs the actual work for one job.
///
/// The scheduler calls `handle` once per processing attempt with a snapshot of
/// the job. Implementations should watch `cancel` and return promptly (ideally
/// with [`HandlerError::Cancelled`]) once it fires. Returning an error other than
/// `Cancelled`, or panicking, marks the job `Failed`.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use prometheus_transcode_queue::core::{HandlerError, Job, JobHandler, JobOutcome, ProgressSink};
/// use tokio_util::sync::CancellationToken;
///
/// struct FfmpegHandler;
///
/// #[async_trait]
/// impl JobHandler for FfmpegHandler {
///     async fn handle(
///         &self,
///         job: Job,
///         progress: ProgressSink,
///         cancel: CancellationToken,
///     ) -> Result<JobOutcome, HandlerError> {
///         for pct in (0..=100).step_by(10) {
///             if cancel.is_cancelled() {
///                 return Err(HandlerError::Cancelled);
///             }
///             progress.report(pct);
///         }
///         Ok(JobOutcome::succeeded(Some(job.file_size_bytes() / 2)))
///     }
/// }
/// ```
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    /// Process one job.
    async fn handle(
        &self,
        job: Job,
        progress: ProgressSink,
        cancel: CancellationToken,
    ) -> Result<JobOutcome, HandlerError>;
}

/// Adapter turning an async closure into a [`JobHandler`].
pub struct FnHandler<F> {
    func: F,
}

/// Wrap a closure `(job, progress, cancel) -> impl Future<Output = Result<JobOutcome, HandlerError>>`.
pub const fn handler_fn<F, Fut>(func: F) -> FnHandler<F>
where
    F: Fn(Job, ProgressSink, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<JobOutcome, HandlerError>> + Send + 'static,
{
    FnHandler { func }
}

#[async_trait]
impl<F, Fut> JobHandler for FnHandler<F>
where
    F: Fn(Job, ProgressSink, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<JobOutcome, HandlerError>> + Send + 'static,
{
    async fn handle(
        &self,
        job: Job,
        progress: ProgressSink,
        cancel: CancellationToken,
    ) -> Result<JobOutcome, HandlerError> {
        (self.func)(job, progress, cancel).await
    }
}

/// Progress callback for one processing attempt.
///
/// Reports are clamped to `[0, 100]` and ignored if lower than the last value,
/// once the attempt's token is cancelled, or after the job left the queue.
#[derive(Clone)]
pub struct ProgressSink {
    job_id: JobId,
    shared: Weak<Shared>,
    cancel: CancellationToken,
}

impl ProgressSink {
    pub(crate) const fn new(job_id: JobId, shared: Weak<Shared>, cancel: CancellationToken) -> Self {
        Self {
            job_id,
            shared,
            cancel,
        }
    }

    /// A sink bound to no queue; reports are dropped. Useful for driving a handler directly.
    #[must_use]
    pub fn detached(job_id: JobId) -> Self {
        Self::new(job_id, Weak::new(), CancellationToken::new())
    }

    /// Job this sink reports for.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Record progress as a percentage.
    pub fn report(&self, percent: i64) {
        if self.cancel.is_cancelled() {
            return;
        }
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        if let Some(job) = shared.mutate(self.job_id, |job| job.record_progress(percent)) {
            shared.notifier.emit(QueueEvent::ItemProgressChanged(job));
        }
    }

    /// Block at a safe point while the queue is globally paused.
    ///
    /// Returns once the queue resumes or this attempt is cancelled.
    pub async fn wait_while_paused(&self) {
        loop {
            let Some(shared) = self.shared.upgrade() else {
                return;
            };
            if !shared.is_paused() {
                return;
            }
            let poll = shared.pause_poll;
            drop(shared);
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => return,
                () = tokio::time::sleep(poll) => {}
            }
        }
    }
}

impl std::fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSink")
            .field("job_id", &self.job_id)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
