//! Point-in-time aggregates over a copy of the job collection.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Job, JobStatus};
use crate::util::clock::bytes_to_mb;

/// Aggregate view of the queue.
///
/// Every job lands in exactly one count bucket, so
/// `total_items == pending + processing + completed + failed + cancelled`.
/// `processing_items` includes paused jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueStatistics {
    /// All jobs in the snapshot.
    pub total_items: usize,
    /// Jobs waiting to run.
    pub pending_items: usize,
    /// Jobs processing or paused.
    pub processing_items: usize,
    /// Jobs that succeeded.
    pub completed_items: usize,
    /// Jobs that failed.
    pub failed_items: usize,
    /// Jobs that were cancelled.
    pub cancelled_items: usize,
    /// Sum of input sizes.
    pub total_input_size: u64,
    /// Sum of output sizes (missing counts as 0).
    pub total_output_size: u64,
    /// Sum of known conversion durations.
    pub total_processing_time: Duration,
    /// Heuristic time until the queue drains.
    pub estimated_time_remaining: Duration,
    /// Input MB per processing second over completed jobs; 0 when unknown.
    pub average_speed_mbps: f64,
}

impl QueueStatistics {
    /// Compute statistics from a snapshot of jobs as of `now`.
    #[must_use]
    pub fn from_jobs(jobs: &[Job], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total_items: jobs.len(),
            ..Self::default()
        };

        let mut completed_mb = 0.0_f64;
        let mut completed_secs = 0.0_f64;
        let mut completed_durations: Vec<Duration> = Vec::new();

        for job in jobs {
            match job.status() {
                JobStatus::Pending => stats.pending_items += 1,
                JobStatus::Processing | JobStatus::Paused => stats.processing_items += 1,
                JobStatus::Completed => stats.completed_items += 1,
                JobStatus::Failed => stats.failed_items += 1,
                JobStatus::Cancelled => stats.cancelled_items += 1,
            }

            stats.total_input_size = stats.total_input_size.saturating_add(job.file_size_bytes());
            stats.total_output_size = stats
                .total_output_size
                .saturating_add(job.output_file_size_bytes().unwrap_or(0));

            if let Some(duration) = job.conversion_duration() {
                stats.total_processing_time += duration;
                if job.status() == JobStatus::Completed {
                    completed_durations.push(duration);
                    if !duration.is_zero() {
                        completed_mb += bytes_to_mb(job.file_size_bytes());
                        completed_secs += duration.as_secs_f64();
                    }
                }
            }
        }

        if completed_secs > 0.0 {
            stats.average_speed_mbps = completed_mb / completed_secs;
        }

        stats.estimated_time_remaining =
            estimate_remaining(jobs, now, typical_duration(&completed_durations));
        stats
    }
}

fn typical_duration(durations: &[Duration]) -> Option<Duration> {
    let count = u32::try_from(durations.len()).ok().filter(|n| *n > 0)?;
    Some(durations.iter().sum::<Duration>() / count)
}

fn estimate_remaining(jobs: &[Job], now: DateTime<Utc>, typical: Option<Duration>) -> Duration {
    jobs.iter()
        .map(|job| match job.status() {
            JobStatus::Processing | JobStatus::Paused if job.progress() > 0 => job
                .elapsed(now)
                .map_or(Duration::ZERO, |elapsed| {
                    let total = elapsed.mul_f64(100.0 / f64::from(job.progress()));
                    total.saturating_sub(elapsed)
                }),
            JobStatus::Pending => typical.unwrap_or(Duration::ZERO),
            _ => Duration::ZERO,
        })
        .sum()
}
