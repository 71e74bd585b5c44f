//! Bounded-concurrency, reorderable job scheduler.
//!
//! The scheduler owns the live job sequence behind a single `parking_lot::Mutex`
//! and hands out snapshot copies only. A run captures every `Pending` job in
//! dispatch order, acquires a slot from a `tokio::sync::Semaphore` for each one in
//! turn and spawns a worker holding that slot until the job finishes.
//!
//! Cancellation is a two-level tree of `CancellationToken`s: one root per run and
//! one child per dispatched job. Cancelling the root (`stop`) cascades; cancelling
//! a child (`cancel_item`, `remove_item`) affects that job alone.
//!
//! Notifications are emitted only after the collection lock is released.
//!
//! # Example
//!
//! ```rust,ignore
//! use prometheus_transcode_queue::config::QueueConfig;
//! use prometheus_transcode_queue::core::{Job, Scheduler};
//!
//! let scheduler = Scheduler::new(QueueConfig::default().with_max_concurrent(2), my_handler)?;
//! let mut events = scheduler.subscribe();
//!
//! scheduler.add_item(Job::new("/media/a.mkv", 700_000_000))?;
//! scheduler.add_item(Job::new("/media/b.mkv", 350_000_000).with_priority(1))?;
//! scheduler.run().await;
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("{event:?}");
//! }
//! ```

mod ordering;
mod worker;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use self::ordering::Move;
use super::{
    EventReceiver, Job, JobHandler, JobId, JobStatus, Notifier, Priority, QueueError, QueueEvent,
    QueueStatistics,
};
use crate::builders::SchedulerBuilder;
use crate::config::QueueConfig;
use crate::runtime::{Spawn, TokioSpawner};
use crate::util::clock::now;

/// Point-in-time copy of the live sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Incremented on every mutation of the collection or any job in it.
    pub version: u64,
    /// Jobs in live (display) order.
    pub jobs: Vec<Job>,
}

/// Why the current run was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopReason {
    /// `stop()` or `clear_queue()`.
    Caller,
    /// A job failed with stop-on-error enabled.
    Error,
}

#[derive(Debug, Default)]
struct QueueState {
    jobs: Vec<Job>,
    version: u64,
    /// Ids of jobs that left the queue. Never handed out again.
    retired: HashSet<JobId>,
}

impl QueueState {
    fn position(&self, id: JobId) -> Option<usize> {
        self.jobs.iter().position(|job| job.id() == id)
    }

    fn id_taken(&self, id: JobId) -> bool {
        id.is_nil() || self.retired.contains(&id) || self.position(id).is_some()
    }

    fn retire<'a>(&mut self, jobs: impl IntoIterator<Item = &'a Job>) {
        self.retired.extend(jobs.into_iter().map(Job::id));
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Per-job token tagged with the dispatch attempt that owns it.
type TokenEntry = (u64, CancellationToken);

/// Clears the `running` flag however the run loop exits.
struct RunFlag<'a>(&'a AtomicBool);

impl<'a> RunFlag<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State shared between the scheduler handle, its workers and progress sinks.
pub(crate) struct Shared {
    state: Mutex<QueueState>,
    tokens: Mutex<HashMap<JobId, TokenEntry>>,
    next_attempt: AtomicU64,
    run_token: Mutex<CancellationToken>,
    gate: Mutex<Arc<Semaphore>>,
    stop: Mutex<Option<StopReason>>,
    running: AtomicBool,
    paused: AtomicBool,
    max_concurrent: AtomicUsize,
    auto_start: AtomicBool,
    stop_on_error: AtomicBool,
    pub(crate) pause_poll: Duration,
    pub(crate) notifier: Notifier,
    pub(crate) handler: Arc<dyn JobHandler>,
    spawner: TokioSpawner,
}

impl Shared {
    /// Apply `f` to the job under the lock. Returns a copy when `f` reports a change.
    pub(crate) fn mutate<F>(&self, id: JobId, f: F) -> Option<Job>
    where
        F: FnOnce(&mut Job) -> bool,
    {
        let mut state = self.state.lock();
        let job = state.jobs.iter_mut().find(|job| job.id() == id)?;
        if !f(job) {
            return None;
        }
        let copy = job.clone();
        state.touch();
        Some(copy)
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    fn stop_on_error(&self) -> bool {
        self.stop_on_error.load(Ordering::Acquire)
    }

    fn auto_start(&self) -> bool {
        self.auto_start.load(Ordering::Acquire)
    }

    fn status_of(&self, id: JobId) -> Option<JobStatus> {
        let state = self.state.lock();
        state.position(id).map(|i| state.jobs[i].status())
    }

    fn has_pending(&self) -> bool {
        self.state
            .lock()
            .jobs
            .iter()
            .any(|job| job.status() == JobStatus::Pending)
    }

    fn token_for(&self, id: JobId) -> Option<CancellationToken> {
        self.tokens.lock().get(&id).map(|(_, token)| token.clone())
    }

    /// Drop the token entry, but only if it still belongs to `attempt`.
    fn release_token(&self, id: JobId, attempt: u64) {
        let mut tokens = self.tokens.lock();
        if tokens.get(&id).is_some_and(|(owner, _)| *owner == attempt) {
            tokens.remove(&id);
        }
    }

    /// Flip a running job between `Processing` and `Paused` to match the pause flag.
    fn sync_pause_state(&self, id: JobId) {
        let paused = self.is_paused();
        let changed = self.mutate(id, |job| if paused { job.pause() } else { job.resume() });
        if let Some(job) = changed {
            debug!(job_id = %id, status = %job.status(), "pause state synced");
            self.notifier.emit(QueueEvent::ItemStatusChanged(job));
        }
    }

    fn request_stop(&self, reason: StopReason) {
        {
            let mut stop = self.stop.lock();
            if stop.is_none() || reason == StopReason::Caller {
                *stop = Some(reason);
            }
        }
        self.run_token.lock().cancel();
        let tokens: Vec<CancellationToken> = self
            .tokens
            .lock()
            .values()
            .map(|(_, token)| token.clone())
            .collect();
        for token in &tokens {
            token.cancel();
        }
        info!(reason = ?reason, in_flight = tokens.len(), "run stop requested");
    }
}

/// Thread-safe job queue with bounded concurrency.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("jobs", &self.len())
            .field("running", &self.is_running())
            .field("paused", &self.is_paused())
            .field("max_concurrent", &self.max_concurrent())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Create a scheduler on the current tokio runtime.
    pub fn new(config: QueueConfig, handler: impl JobHandler) -> Result<Self, QueueError> {
        SchedulerBuilder::new(handler).config(config).build()
    }

    /// Start building a scheduler.
    pub fn builder(handler: impl JobHandler) -> SchedulerBuilder {
        SchedulerBuilder::new(handler)
    }

    pub(crate) fn from_parts(
        config: &QueueConfig,
        handler: Arc<dyn JobHandler>,
        spawner: TokioSpawner,
    ) -> Self {
        let max_concurrent = QueueConfig::clamp_concurrency(config.max_concurrent);
        let shared = Shared {
            state: Mutex::new(QueueState::default()),
            tokens: Mutex::new(HashMap::new()),
            next_attempt: AtomicU64::new(0),
            run_token: Mutex::new(CancellationToken::new()),
            gate: Mutex::new(Arc::new(Semaphore::new(max_concurrent))),
            stop: Mutex::new(None),
            running: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            max_concurrent: AtomicUsize::new(max_concurrent),
            auto_start: AtomicBool::new(config.auto_start_next_item),
            stop_on_error: AtomicBool::new(config.stop_on_error),
            pause_poll: config.pause_poll_interval(),
            notifier: Notifier::new(),
            handler,
            spawner,
        };
        info!(max_concurrent, "scheduler created");
        Self {
            shared: Arc::new(shared),
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> EventReceiver {
        self.shared.notifier.subscribe()
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Add a job, returning its assigned id.
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidJob`] if the job has no input path.
    pub fn add_item(&self, job: Job) -> Result<JobId, QueueError> {
        self.add_items([job]).map(|ids| ids[0])
    }

    /// Add several jobs atomically. Nothing is added if any job is invalid.
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidJob`] if any job has no input path.
    pub fn add_items(&self, jobs: impl IntoIterator<Item = Job>) -> Result<Vec<JobId>, QueueError> {
        let mut jobs: Vec<Job> = jobs.into_iter().collect();
        if let Some(bad) = jobs.iter().position(|job| job.file_path().as_os_str().is_empty()) {
            return Err(QueueError::InvalidJob(format!(
                "job at index {bad} has an empty file path"
            )));
        }

        let added: Vec<Job> = {
            let mut state = self.shared.state.lock();
            let stamp = now();
            for job in &mut jobs {
                if state.id_taken(job.id()) {
                    job.set_id(Uuid::new_v4());
                }
                job.admit(stamp);
                state.jobs.push(job.clone());
            }
            state.touch();
            jobs
        };

        let ids: Vec<JobId> = added.iter().map(Job::id).collect();
        debug!(count = ids.len(), "jobs added");
        self.shared
            .notifier
            .emit_all(added.into_iter().map(QueueEvent::ItemAdded));

        if !ids.is_empty() && self.shared.auto_start() && !self.is_running() {
            self.start();
        }
        Ok(ids)
    }

    /// Remove a job. A running job has its token cancelled before it is removed.
    /// Returns `false` for unknown ids.
    pub fn remove_item(&self, id: JobId) -> bool {
        if let Some(token) = self.shared.token_for(id) {
            token.cancel();
        }
        let removed = {
            let mut state = self.shared.state.lock();
            let removed = state.position(id).map(|i| state.jobs.remove(i));
            if let Some(job) = &removed {
                state.retire([job]);
                state.touch();
            }
            removed
        };
        match removed {
            Some(job) => {
                debug!(job_id = %id, "job removed");
                self.shared.notifier.emit(QueueEvent::ItemRemoved(job));
                true
            }
            None => false,
        }
    }

    /// Stop the run and remove every job. Returns how many were removed.
    pub fn clear_queue(&self) -> usize {
        self.shared.request_stop(StopReason::Caller);
        let removed = {
            let mut state = self.shared.state.lock();
            let removed: Vec<Job> = state.jobs.drain(..).collect();
            state.retire(&removed);
            state.touch();
            removed
        };
        let count = removed.len();
        info!(count, "queue cleared");
        self.shared
            .notifier
            .emit_all(removed.into_iter().map(QueueEvent::ItemRemoved));
        count
    }

    /// Remove completed jobs. Returns how many were removed.
    pub fn clear_completed(&self) -> usize {
        let removed = {
            let mut state = self.shared.state.lock();
            let (done, keep): (Vec<Job>, Vec<Job>) = state
                .jobs
                .drain(..)
                .partition(|job| job.status() == JobStatus::Completed);
            state.jobs = keep;
            state.retire(&done);
            if !done.is_empty() {
                state.touch();
            }
            done
        };
        let count = removed.len();
        debug!(count, "completed jobs cleared");
        self.shared
            .notifier
            .emit_all(removed.into_iter().map(QueueEvent::ItemRemoved));
        count
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    fn move_item(&self, id: JobId, mv: Move) -> bool {
        let moved = {
            let mut state = self.shared.state.lock();
            let moved = state
                .position(id)
                .is_some_and(|i| ordering::apply_move(&mut state.jobs, i, mv));
            if moved {
                state.touch();
            }
            moved
        };
        if moved {
            self.shared.notifier.emit(QueueEvent::QueueReordered);
        }
        moved
    }

    /// Move a job one place towards the front.
    pub fn move_up(&self, id: JobId) -> bool {
        self.move_item(id, Move::Up)
    }

    /// Move a job one place towards the back.
    pub fn move_down(&self, id: JobId) -> bool {
        self.move_item(id, Move::Down)
    }

    /// Move a job to the front.
    pub fn move_to_top(&self, id: JobId) -> bool {
        self.move_item(id, Move::ToTop)
    }

    /// Move a job to the back.
    pub fn move_to_bottom(&self, id: JobId) -> bool {
        self.move_item(id, Move::ToBottom)
    }

    /// Set a job's priority, clamped into `[1, 5]`. With auto-start enabled the
    /// live sequence is re-sorted by priority.
    pub fn set_priority(&self, id: JobId, value: i64) -> bool {
        let priority = Priority::clamped(value);
        let resort = self.shared.auto_start();
        let updated = {
            let mut state = self.shared.state.lock();
            let Some(i) = state.position(id) else {
                return false;
            };
            state.jobs[i].set_priority(priority);
            let updated = state.jobs[i].clone();
            if resort {
                ordering::sort_by_priority(&mut state.jobs);
            }
            state.touch();
            updated
        };
        debug!(job_id = %id, priority = priority.value(), "priority set");
        self.shared.notifier.emit(QueueEvent::ItemUpdated(updated));
        if resort {
            self.shared.notifier.emit(QueueEvent::QueueReordered);
        }
        true
    }

    /// Flip a job's starred flag. A newly starred job moves to the front.
    /// Returns the new flag, or `None` for unknown ids.
    pub fn toggle_starred(&self, id: JobId) -> Option<bool> {
        let (updated, moved) = {
            let mut state = self.shared.state.lock();
            let i = state.position(id)?;
            let starred = state.jobs[i].toggle_starred();
            let updated = state.jobs[i].clone();
            let moved = starred && ordering::apply_move(&mut state.jobs, i, Move::ToTop);
            state.touch();
            (updated, moved)
        };
        let starred = updated.is_starred();
        self.shared.notifier.emit(QueueEvent::ItemUpdated(updated));
        if moved {
            self.shared.notifier.emit(QueueEvent::QueueReordered);
        }
        Some(starred)
    }

    fn sort_with(&self, sort: fn(&mut [Job]), key: &str) {
        {
            let mut state = self.shared.state.lock();
            sort(&mut state.jobs);
            state.touch();
        }
        debug!(key, "queue sorted");
        self.shared.notifier.emit(QueueEvent::QueueReordered);
    }

    /// Sort by starred, then priority, then age.
    pub fn sort_by_priority(&self) {
        self.sort_with(ordering::sort_by_priority, "priority");
    }

    /// Sort largest input first.
    pub fn sort_by_size(&self) {
        self.sort_with(ordering::sort_by_size, "size");
    }

    /// Sort by conversion duration, shortest first, unknown last.
    pub fn sort_by_duration(&self) {
        self.sort_with(ordering::sort_by_duration, "duration");
    }

    /// Sort oldest first.
    pub fn sort_by_added_date(&self) {
        self.sort_with(ordering::sort_by_added_date, "added_date");
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Process every pending job, returning when the run (and any automatic
    /// restarts) finish. Returns immediately if a run is already active.
    ///
    /// The run itself executes as a task on the scheduler's runtime. Dropping
    /// this future detaches it; [`Scheduler::stop`] still halts it.
    pub async fn run(&self) {
        let this = self.clone();
        let task = self.shared.spawner.handle().spawn(async move { this.drive().await });
        if let Err(err) = task.await {
            error!("run task failed: {err}");
        }
    }

    async fn drive(&self) {
        let shared = &self.shared;
        let Some(mut flag) = RunFlag::acquire(&shared.running) else {
            debug!("run already in progress");
            return;
        };

        loop {
            Self::run_pass(shared).await;

            let stop = *shared.stop.lock();
            let has_pending = shared.has_pending();
            if !has_pending && stop.is_none() {
                info!("queue completed");
                shared.notifier.emit(QueueEvent::QueueCompleted);
            }

            let may_restart = shared.auto_start() && stop != Some(StopReason::Caller);
            if may_restart && has_pending {
                info!("pending jobs remain, restarting run");
                continue;
            }

            drop(flag);
            // Jobs added between the pending check and the flag reset saw a busy queue.
            if !(may_restart && shared.has_pending()) {
                break;
            }
            match RunFlag::acquire(&shared.running) {
                Some(reacquired) => flag = reacquired,
                None => break,
            }
        }
    }

    async fn run_pass(shared: &Arc<Shared>) {
        *shared.stop.lock() = None;
        let limit = shared.max_concurrent.load(Ordering::Acquire);
        let gate = Arc::new(Semaphore::new(limit));
        *shared.gate.lock() = Arc::clone(&gate);
        let run_token = CancellationToken::new();
        *shared.run_token.lock() = run_token.clone();

        let order = ordering::pending_dispatch_order(&shared.state.lock().jobs);
        info!(jobs = order.len(), max_concurrent = limit, "run started");

        let mut workers = JoinSet::new();
        for id in order {
            let permit = tokio::select! {
                biased;
                () = run_token.cancelled() => break,
                permit = Arc::clone(&gate).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };
            if shared.status_of(id) != Some(JobStatus::Pending) {
                continue;
            }
            let token = run_token.child_token();
            let attempt = shared.next_attempt.fetch_add(1, Ordering::Relaxed);
            shared.tokens.lock().insert(id, (attempt, token.clone()));
            workers.spawn(worker::run_job(Arc::clone(shared), id, attempt, permit, token));
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                error!("worker task aborted: {err}");
            }
        }
        debug!("run pass finished");
    }

    /// Spawn [`Scheduler::run`] in the background and return immediately.
    pub fn start(&self) {
        let this = self.clone();
        self.shared.spawner.spawn(async move {
            this.drive().await;
        });
    }

    /// Globally pause. Running jobs keep their slots; undispatched jobs wait.
    pub fn pause(&self) {
        if !self.shared.paused.swap(true, Ordering::AcqRel) {
            info!("queue paused");
        }
    }

    /// Clear the global pause.
    pub fn resume(&self) {
        if self.shared.paused.swap(false, Ordering::AcqRel) {
            info!("queue resumed");
        }
    }

    /// Stop the current run: cancel the run token and every per-job token.
    /// Running jobs end `Cancelled`; jobs not yet started stay `Pending`.
    pub fn stop(&self) {
        self.shared.request_stop(StopReason::Caller);
    }

    /// Return a failed or cancelled job to `Pending`. Does not start a run.
    pub fn retry(&self, id: JobId) -> bool {
        match self.shared.mutate(id, Job::retry) {
            Some(job) => {
                debug!(job_id = %id, "job retried");
                self.shared.notifier.emit(QueueEvent::ItemStatusChanged(job));
                true
            }
            None => false,
        }
    }

    /// Retry every failed or cancelled job. Returns how many were reset.
    pub fn retry_failed(&self) -> usize {
        let retried: Vec<Job> = {
            let mut state = self.shared.state.lock();
            let retried: Vec<Job> = state
                .jobs
                .iter_mut()
                .filter_map(|job| job.retry().then(|| job.clone()))
                .collect();
            if !retried.is_empty() {
                state.touch();
            }
            retried
        };
        let count = retried.len();
        self.shared
            .notifier
            .emit_all(retried.into_iter().map(QueueEvent::ItemStatusChanged));
        count
    }

    /// Cancel one job: a running job through its token, a pending job directly.
    pub fn cancel_item(&self, id: JobId) -> bool {
        // The status check and the transition share one critical section, so a
        // job the dispatcher has just started is never marked from here.
        let pending = self
            .shared
            .mutate(id, |job| job.status() == JobStatus::Pending && job.cancel(now()));
        if let Some(job) = pending {
            // Dispatched but still waiting out a pause.
            if let Some(token) = self.shared.token_for(id) {
                token.cancel();
            }
            debug!(job_id = %id, "pending job cancelled");
            self.shared.notifier.emit(QueueEvent::ItemStatusChanged(job));
            return true;
        }

        match self.shared.status_of(id) {
            Some(JobStatus::Processing | JobStatus::Paused) => {
                self.shared.token_for(id).is_some_and(|token| {
                    debug!(job_id = %id, "cancelling running job");
                    token.cancel();
                    true
                })
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Statistics computed from a consistent copy of the queue.
    pub fn statistics(&self) -> QueueStatistics {
        let jobs = self.shared.state.lock().jobs.clone();
        QueueStatistics::from_jobs(&jobs, now())
    }

    /// Copy of the live sequence with its version.
    pub fn snapshot(&self) -> QueueSnapshot {
        let state = self.shared.state.lock();
        QueueSnapshot {
            version: state.version,
            jobs: state.jobs.clone(),
        }
    }

    /// Copy of one job.
    pub fn get(&self, id: JobId) -> Option<Job> {
        let state = self.shared.state.lock();
        state.position(id).map(|i| state.jobs[i].clone())
    }

    /// Jobs with the given status, in live order.
    pub fn filter_by_status(&self, status: JobStatus) -> Vec<Job> {
        self.collect_where(|job| job.status() == status)
    }

    /// Starred jobs, in live order.
    pub fn starred_items(&self) -> Vec<Job> {
        self.collect_where(Job::is_starred)
    }

    fn collect_where(&self, keep: impl Fn(&Job) -> bool) -> Vec<Job> {
        self.shared
            .state
            .lock()
            .jobs
            .iter()
            .filter(|job| keep(job))
            .cloned()
            .collect()
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.shared.state.lock().jobs.len()
    }

    /// Whether the queue holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a run is active.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Whether the queue is globally paused.
    pub fn is_paused(&self) -> bool {
        self.shared.is_paused()
    }

    // ------------------------------------------------------------------
    // Policies
    // ------------------------------------------------------------------

    /// Configured concurrency limit.
    pub fn max_concurrent(&self) -> usize {
        self.shared.max_concurrent.load(Ordering::Acquire)
    }

    /// Change the concurrency limit (clamped into `[1, 8]`). Takes effect
    /// immediately when idle, otherwise at the next run. Returns the applied value.
    pub fn set_max_concurrent(&self, value: usize) -> usize {
        let limit = QueueConfig::clamp_concurrency(value);
        self.shared.max_concurrent.store(limit, Ordering::Release);
        if self.is_running() {
            debug!(limit, "concurrency change deferred until next run");
        } else {
            *self.shared.gate.lock() = Arc::new(Semaphore::new(limit));
            debug!(limit, "concurrency gate recreated");
        }
        limit
    }

    /// Free slots in the current concurrency gate.
    pub fn available_slots(&self) -> usize {
        self.shared.gate.lock().available_permits()
    }

    /// Whether adding jobs to an idle queue starts a run.
    pub fn auto_start_next_item(&self) -> bool {
        self.shared.auto_start()
    }

    /// Enable or disable auto-start.
    pub fn set_auto_start_next_item(&self, enabled: bool) {
        self.shared.auto_start.store(enabled, Ordering::Release);
    }

    /// Whether a failure stops the run.
    pub fn stop_on_error(&self) -> bool {
        self.shared.stop_on_error()
    }

    /// Enable or disable stop-on-error.
    pub fn set_stop_on_error(&self, enabled: bool) {
        self.shared.stop_on_error.store(enabled, Ordering::Release);
    }

    /// Current effective configuration.
    pub fn config(&self) -> QueueConfig {
        QueueConfig {
            max_concurrent: self.max_concurrent(),
            auto_start_next_item: self.auto_start_next_item(),
            stop_on_error: self.stop_on_error(),
            pause_poll_interval_ms: u64::try_from(self.shared.pause_poll.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}
