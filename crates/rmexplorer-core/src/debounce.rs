//! Trailing-edge debouncer

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Collapses bursts of calls into one call after a quiet period
///
/// Each [`Debouncer::call`] cancels the pending call, if any, and schedules
/// the action with the latest arguments once `delay` passes without another
/// call. An action that already started is never cancelled.
///
/// Calls must be made from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            action: Arc::new(move |args| Box::pin(action(args))),
            pending: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule the action, superseding any call still waiting
    pub fn call(&self, args: T) {
        let action = Arc::clone(&self.action);
        let delay = self.delay;
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach so a later call can only abort the wait, not the action
            tokio::spawn(action(args));
        }));
    }

    /// Drop the waiting call, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, Debouncer<u32>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let debouncer = Debouncer::new(Duration::from_millis(300), move |value| {
            let sink = Arc::clone(&sink);
            async move { sink.lock().push(value) }
        });
        (seen, debouncer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_call() {
        let (seen, debouncer) = recorder();

        for value in 1..=5 {
            debouncer.call(value);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().is_empty());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*seen.lock(), vec![5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_windows_each_fire() {
        let (seen, debouncer) = recorder();

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_call() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let debouncer = Debouncer::new(Duration::from_millis(50), move |(): ()| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        debouncer.call(());
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
