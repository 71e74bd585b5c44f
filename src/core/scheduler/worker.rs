//! Per-job worker: waits out a pause, runs the handler, and records the outcome.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::OwnedSemaphorePermit;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{Shared, StopReason};
use crate::core::{HandlerError, JobId, JobOutcome, ProgressSink, QueueEvent};
use crate::util::clock::now;

/// How a processing attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Attempt {
    Succeeded(Option<u64>),
    Failed(String),
    Cancelled,
}

type Caught = Result<Result<JobOutcome, HandlerError>, Box<dyn Any + Send>>;

impl Attempt {
    fn from_handler(result: Caught, cancelled: bool) -> Self {
        match result {
            Err(panic) => Self::Failed(panic_message(panic.as_ref())),
            Ok(Ok(outcome)) if outcome.success => Self::Succeeded(outcome.output_size),
            Ok(Err(HandlerError::Cancelled)) => Self::Cancelled,
            _ if cancelled => Self::Cancelled,
            Ok(Ok(outcome)) => Self::Failed(
                outcome
                    .error_message
                    .unwrap_or_else(|| "handler reported failure".into()),
            ),
            Ok(Err(err)) => Self::Failed(err.to_string()),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .map_or_else(
            || "handler panicked".to_string(),
            |msg| format!("handler panicked: {msg}"),
        )
}

/// Drive one dispatched job. The gate permit is held for the whole call,
/// including any time spent waiting out a pause. `attempt` identifies the token
/// entry this worker owns.
pub(super) async fn run_job(
    shared: Arc<Shared>,
    id: JobId,
    attempt: u64,
    permit: OwnedSemaphorePermit,
    token: CancellationToken,
) {
    let poll = shared.pause_poll;

    while shared.is_paused() && !token.is_cancelled() {
        tokio::select! {
            biased;
            () = token.cancelled() => {}
            () = tokio::time::sleep(poll) => {}
        }
    }

    if token.is_cancelled() {
        debug!(job_id = %id, "cancelled before start");
        shared.release_token(id, attempt);
        drop(permit);
        return;
    }

    let Some(job) = shared.mutate(id, |job| job.start(now())) else {
        debug!(job_id = %id, "no longer pending, skipping");
        shared.release_token(id, attempt);
        drop(permit);
        return;
    };
    info!(job_id = %id, path = %job.file_path().display(), "processing started");
    shared.notifier.emit(QueueEvent::ItemStatusChanged(job.clone()));

    let sink = ProgressSink::new(id, Arc::downgrade(&shared), token.clone());
    let handler = Arc::clone(&shared.handler);
    let handled = AssertUnwindSafe(handler.handle(job, sink, token.clone())).catch_unwind();
    tokio::pin!(handled);

    let mut pause_tick = tokio::time::interval(poll);
    pause_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let outcome = loop {
        tokio::select! {
            biased;
            () = token.cancelled() => break Attempt::Cancelled,
            result = &mut handled => break Attempt::from_handler(result, token.is_cancelled()),
            _ = pause_tick.tick() => shared.sync_pause_state(id),
        }
    };

    finish(&shared, id, outcome);
    shared.release_token(id, attempt);
    drop(permit);
}

fn finish(shared: &Shared, id: JobId, outcome: Attempt) {
    match outcome {
        Attempt::Succeeded(output_size) => {
            if let Some(job) = shared.mutate(id, |job| job.complete(now(), output_size)) {
                info!(job_id = %id, duration = ?job.conversion_duration(), "processing completed");
                shared.notifier.emit(QueueEvent::ItemStatusChanged(job));
            }
        }
        Attempt::Cancelled => {
            if let Some(job) = shared.mutate(id, |job| job.cancel(now())) {
                info!(job_id = %id, "processing cancelled");
                shared.notifier.emit(QueueEvent::ItemStatusChanged(job));
            } else {
                debug!(job_id = %id, "cancelled job no longer tracked");
            }
        }
        Attempt::Failed(message) => {
            let Some(job) = shared.mutate(id, |job| job.fail(now(), message.clone())) else {
                return;
            };
            warn!(job_id = %id, error = %message, "processing failed");
            let report = format!("{}: {message}", job.file_path().display());
            shared.notifier.emit_all([
                QueueEvent::ItemStatusChanged(job),
                QueueEvent::ErrorOccurred(report),
            ]);
            if shared.stop_on_error() {
                warn!(job_id = %id, "stop-on-error enabled, stopping run");
                shared.request_stop(StopReason::Error);
            }
        }
    }
}
