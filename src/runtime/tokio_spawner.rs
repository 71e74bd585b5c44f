//! Tokio runtime spawner implementation.

use std::future::Future;

use tokio::runtime::Handle;

use super::Spawn;

/// Spawner that executes background runs on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioSpawner {
    handle: Handle,
}

impl TokioSpawner {
    /// Create a spawner from a tokio runtime handle.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Spawner for the runtime the caller is currently inside, if any.
    #[must_use]
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Underlying runtime handle.
    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(fut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_try_current_outside_runtime() {
        assert!(TokioSpawner::try_current().is_none());
    }

    #[tokio::test]
    async fn test_spawn_runs_future() {
        let spawner = TokioSpawner::try_current().unwrap();
        let ran = Arc::new(AtomicBool::new(false));
        let (tx, rx) = tokio::sync::oneshot::channel();
        let flag = Arc::clone(&ran);
        spawner.spawn(async move {
            flag.store(true, Ordering::SeqCst);
            let _ = tx.send(());
        });
        rx.await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }
}
