//! Ordering, sorting and manual repositioning over the live job sequence.
//!
//! All sorts are stable, so ties keep their current relative order.

use std::cmp::{Ordering, Reverse};

use crate::core::{Job, JobId};

/// Dispatch order: starred first, then most urgent priority, then oldest.
pub(crate) fn by_dispatch_order(a: &Job, b: &Job) -> Ordering {
    (Reverse(a.is_starred()), a.priority(), a.added_at())
        .cmp(&(Reverse(b.is_starred()), b.priority(), b.added_at()))
}

pub(crate) fn sort_by_priority(jobs: &mut [Job]) {
    jobs.sort_by(by_dispatch_order);
}

/// Largest input first.
pub(crate) fn sort_by_size(jobs: &mut [Job]) {
    jobs.sort_by_key(|job| Reverse(job.file_size_bytes()));
}

/// Shortest known conversion duration first; unknown durations last.
pub(crate) fn sort_by_duration(jobs: &mut [Job]) {
    jobs.sort_by_key(|job| (job.conversion_duration().is_none(), job.conversion_duration()));
}

/// Oldest first.
pub(crate) fn sort_by_added_date(jobs: &mut [Job]) {
    jobs.sort_by_key(Job::added_at);
}

/// Ids of pending jobs in dispatch order.
pub(crate) fn pending_dispatch_order(jobs: &[Job]) -> Vec<JobId> {
    let mut pending: Vec<&Job> = jobs
        .iter()
        .filter(|job| job.status() == crate::core::JobStatus::Pending)
        .collect();
    pending.sort_by(|a, b| by_dispatch_order(a, b));
    pending.into_iter().map(Job::id).collect()
}

/// Manual repositioning within the live sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move {
    Up,
    Down,
    ToTop,
    ToBottom,
}

/// Apply a move to the job at `index`. Returns whether anything changed.
pub(crate) fn apply_move(jobs: &mut Vec<Job>, index: usize, mv: Move) -> bool {
    let last = jobs.len().saturating_sub(1);
    if index > last || jobs.is_empty() {
        return false;
    }
    match mv {
        Move::Up if index > 0 => jobs.swap(index, index - 1),
        Move::Down if index < last => jobs.swap(index, index + 1),
        Move::ToTop if index > 0 => {
            let job = jobs.remove(index);
            jobs.insert(0, job);
        }
        Move::ToBottom if index < last => {
            let job = jobs.remove(index);
            jobs.push(job);
        }
        _ => return false,
    }
    true
}
