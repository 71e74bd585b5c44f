//! Configuration models for the queue scheduler.

pub mod queue;

pub use queue::{QueueConfig, MAX_CONCURRENT_LIMIT, MIN_CONCURRENT_LIMIT};
