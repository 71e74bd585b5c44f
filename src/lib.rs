//! # Prometheus Transcode Queue
//!
//! A thread-safe, reorderable job queue for desktop transcoding front-ends.
//!
//! The crate owns scheduling only. The actual media work is done by a caller-supplied
//! [`JobHandler`](core::JobHandler) that receives one job, a progress sink and a
//! cancellation token, and reports success or failure.
//!
//! ## Key Features
//!
//! - **Bounded concurrency**: at most `max_concurrent` (1-8) jobs process at once
//! - **Priority and starring**: dispatch order is recomputed at the start of every run
//! - **Pause without losing work**: running jobs keep their slot while paused
//! - **Two-level cancellation**: cancel one job, or stop the whole run
//! - **Retry**: failed and cancelled jobs can be returned to the queue
//! - **Consistent statistics**: aggregates are computed from a locked copy
//! - **Decoupled notifications**: events are delivered over channels, never under the lock
//!
//! ## Example
//!
//! ```rust,ignore
//! use prometheus_transcode_queue::config::QueueConfig;
//! use prometheus_transcode_queue::core::{handler_fn, Job, JobOutcome, Scheduler};
//!
//! let handler = handler_fn(|job, progress, cancel| async move {
//!     progress.report(50);
//!     Ok(JobOutcome::succeeded(Some(job.file_size_bytes() / 2)))
//! });
//!
//! let scheduler = Scheduler::new(QueueConfig::default().with_max_concurrent(2), handler)?;
//! scheduler.add_item(Job::new("/media/clip.mov", 1_000_000))?;
//! scheduler.run().await;
//! println!("{:?}", scheduler.statistics());
//! ```
//!
//! For complete scenarios, see `tests/scheduler_test.rs`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core queue abstractions: jobs, handlers, events, statistics and the scheduler.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Runtime adapters used to spawn background runs.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::config::QueueConfig;
pub use crate::core::{
    handler_fn, HandlerError, Job, JobHandler, JobId, JobOutcome, JobStatus, ProgressSink,
    QueueError, QueueEvent, QueueStatistics, Scheduler,
};
