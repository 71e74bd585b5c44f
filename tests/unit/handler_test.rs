//! Tests for handler adapters and the progress sink

use prometheus_transcode_queue::core::{
    handler_fn, HandlerError, Job, JobHandler, JobOutcome, ProgressSink,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[test]
fn test_job_outcome_constructors() {
    let ok = JobOutcome::succeeded(Some(10));
    assert!(ok.success);
    assert_eq!(ok.output_size, Some(10));
    assert_eq!(ok.error_message, None);

    let bad = JobOutcome::failed("unsupported container");
    assert!(!bad.success);
    assert_eq!(bad.output_size, None);
    assert_eq!(bad.error_message.as_deref(), Some("unsupported container"));
}

#[tokio::test]
async fn test_handler_fn_forwards_arguments() {
    let handler = handler_fn(|job: Job, progress: ProgressSink, cancel: CancellationToken| async move {
        assert_eq!(progress.job_id(), job.id());
        if cancel.is_cancelled() {
            return Err(HandlerError::Cancelled);
        }
        progress.report(50);
        Ok(JobOutcome::succeeded(Some(job.file_size_bytes() * 2)))
    });

    let id = Uuid::new_v4();
    let job = Job::new("/media/in.mov", 21).with_id(id);
    let outcome = handler
        .handle(job.clone(), ProgressSink::detached(id), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, JobOutcome::succeeded(Some(42)));

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    let err = handler
        .handle(job, ProgressSink::detached(id), cancelled)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_detached_sink_is_inert() {
    let sink = ProgressSink::detached(Uuid::new_v4());
    sink.report(75);
    // Not attached to a scheduler, so there is no pause to wait out.
    tokio::time::timeout(std::time::Duration::from_millis(100), sink.wait_while_paused())
        .await
        .expect("detached sink never blocks");
}
