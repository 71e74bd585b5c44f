//! Tests for error types

use prometheus_transcode_queue::core::{AppResult, HandlerError, QueueError};

#[test]
fn test_queue_error_display() {
    let err = QueueError::InvalidJob("job at index 0 has an empty file path".into());
    assert_eq!(err.to_string(), "invalid job: job at index 0 has an empty file path");

    let err = QueueError::NoRuntime;
    assert_eq!(err.to_string(), "no tokio runtime available");

    let err = QueueError::Config("max_concurrent out of range".into());
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn test_handler_error_display() {
    assert_eq!(HandlerError::Cancelled.to_string(), "cancelled");
    assert_eq!(HandlerError::Failed("bad codec".into()).to_string(), "bad codec");
}

#[test]
fn test_handler_error_from_anyhow() {
    let err: HandlerError = anyhow::anyhow!("disk full").into();
    assert!(matches!(err, HandlerError::Other(_)));
    assert_eq!(err.to_string(), "disk full");
    assert!(!err.is_cancelled());
    assert!(HandlerError::Cancelled.is_cancelled());
}

#[test]
fn test_handler_error_question_mark() {
    fn probe() -> Result<u32, HandlerError> {
        let parsed: u32 = "x".parse().map_err(anyhow::Error::from)?;
        Ok(parsed)
    }
    assert!(matches!(probe(), Err(HandlerError::Other(_))));
}

#[test]
fn test_queue_error_into_app_result() {
    fn fallible() -> AppResult<()> {
        Err(QueueError::NoRuntime)?;
        Ok(())
    }
    let err = fallible().unwrap_err();
    assert!(err.downcast_ref::<QueueError>().is_some());
}
