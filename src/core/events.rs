//! Change notifications and their delivery.
//!
//! Events are pushed onto per-subscriber unbounded channels and drained by the
//! consumer on its own task or thread. The scheduler only emits after releasing its
//! collection lock, so a consumer may call straight back into the scheduler.

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::Job;

/// Notification raised by the scheduler. Job payloads are snapshot copies.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    /// A job entered the queue.
    ItemAdded(Job),
    /// A job left the queue.
    ItemRemoved(Job),
    /// A job changed status.
    ItemStatusChanged(Job),
    /// A running job reported progress.
    ItemProgressChanged(Job),
    /// A job's priority or starred flag changed.
    ItemUpdated(Job),
    /// The live ordering changed (move, star, sort).
    QueueReordered,
    /// A run finished with nothing left pending and was not stopped.
    QueueCompleted,
    /// A job failed.
    ErrorOccurred(String),
}

/// Receiving half handed to subscribers.
pub type EventReceiver = UnboundedReceiver<QueueEvent>;

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Mutex<Vec<UnboundedSender<QueueEvent>>>,
}

impl Notifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        let mut subs = self.subscribers.lock();
        subs.retain(|tx| !tx.is_closed());
        subs.len()
    }

    /// Deliver one event. Subscribers whose receiver was dropped are pruned.
    pub fn emit(&self, event: QueueEvent) {
        let mut subs = self.subscribers.lock();
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Deliver a batch in order.
    pub fn emit_all(&self, events: impl IntoIterator<Item = QueueEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}
