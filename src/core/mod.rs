//! Core queue abstractions: jobs, handlers, events, statistics and the scheduler.

pub mod error;
pub mod events;
pub mod handler;
pub mod job;
pub mod scheduler;
pub mod statistics;

pub use error::{AppResult, HandlerError, QueueError};
pub use events::{EventReceiver, Notifier, QueueEvent};
pub use handler::{handler_fn, FnHandler, JobHandler, JobOutcome, ProgressSink};
pub use job::{Job, JobId, JobStatus, Priority};
pub use scheduler::{QueueSnapshot, Scheduler};
pub use statistics::QueueStatistics;
