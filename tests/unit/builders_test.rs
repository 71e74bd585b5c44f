//! Tests for builder modules

use prometheus_transcode_queue::builders::SchedulerBuilder;
use prometheus_transcode_queue::config::QueueConfig;
use prometheus_transcode_queue::core::{
    handler_fn, HandlerError, JobHandler, JobOutcome, QueueError, Scheduler,
};
use prometheus_transcode_queue::runtime::TokioSpawner;

fn noop() -> impl JobHandler {
    handler_fn(|_job, _progress, _cancel| async { Ok::<_, HandlerError>(JobOutcome::succeeded(None)) })
}

#[test]
fn test_scheduler_builder_defaults() {
    let builder = SchedulerBuilder::new(noop());
    assert_eq!(builder.current_config(), &QueueConfig::default());
}

#[test]
fn test_scheduler_builder_setters() {
    let builder = Scheduler::builder(noop())
        .max_concurrent(40)
        .auto_start_next_item(true)
        .stop_on_error(true)
        .pause_poll_interval_ms(10);
    let config = builder.current_config();
    assert_eq!(config.max_concurrent, 8);
    assert!(config.auto_start_next_item);
    assert!(config.stop_on_error);
    assert_eq!(config.pause_poll_interval_ms, 10);
}

#[test]
fn test_scheduler_builder_requires_runtime() {
    let err = SchedulerBuilder::new(noop()).build().unwrap_err();
    assert!(matches!(err, QueueError::NoRuntime));
}

#[test]
fn test_scheduler_builder_rejects_invalid_config() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let err = SchedulerBuilder::new(noop())
        .pause_poll_interval_ms(0)
        .spawner(TokioSpawner::new(runtime.handle().clone()))
        .build()
        .unwrap_err();
    assert!(matches!(err, QueueError::Config(_)));
}

#[test]
fn test_scheduler_builder_with_explicit_spawner() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let scheduler = SchedulerBuilder::new(noop())
        .max_concurrent(3)
        .spawner(TokioSpawner::new(runtime.handle().clone()))
        .build()
        .unwrap();
    assert_eq!(scheduler.max_concurrent(), 3);
    assert_eq!(scheduler.available_slots(), 3);
    assert!(scheduler.is_empty());
    assert!(!scheduler.is_running());
}

#[tokio::test]
async fn test_scheduler_builder_config_roundtrip() {
    let config = QueueConfig::default()
        .with_max_concurrent(2)
        .with_stop_on_error(true)
        .with_pause_poll_interval_ms(75);
    let scheduler = SchedulerBuilder::new(noop()).config(config.clone()).build().unwrap();
    assert_eq!(scheduler.config(), config);
}
