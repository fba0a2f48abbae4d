//! Cooperative cancellation for in-flight runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Cloneable handle that cancels the session's in-flight run.
///
/// Cancellation is cooperative: [`cancel`](Self::cancel) raises a flag and
/// wakes the session, which drops the in-flight request future and settles
/// the run as cancelled. The remote executor is not guaranteed to stop
/// working; only its result is disregarded.
///
/// Cancelling while nothing is running is harmless; the flag is cleared at
/// the start of the next run.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    flag: AtomicBool,
    notify: Notify,
}

impl CancelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the current run.
    pub fn cancel(&self) {
        self.inner.flag.store(true, Ordering::Release);
        // notify_one stores a permit when no waiter is registered, so a
        // cancel racing ahead of the session's await is not lost.
        self.inner.notify.notify_one();
    }

    /// Whether cancellation has been requested since the last reset.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::Acquire)
    }

    /// Clear the flag before a new run. Stale wakeup permits are harmless:
    /// `cancelled` re-checks the flag after every wake.
    pub(crate) fn reset(&self) {
        self.inner.flag.store(false, Ordering::Release);
    }

    /// Resolve once cancellation is requested.
    pub(crate) async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            self.inner.notify.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancel_before_wait_resolves_immediately() {
        let handle = CancelHandle::new();
        handle.cancel();
        tokio::time::timeout(Duration::from_millis(50), handle.cancelled())
            .await
            .expect("cancelled() should resolve after cancel()");
    }

    #[tokio::test]
    async fn cancel_wakes_a_parked_waiter() {
        let handle = CancelHandle::new();
        let waiter = handle.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });
        tokio::task::yield_now().await;
        handle.cancel();
        tokio::time::timeout(Duration::from_millis(100), task)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[tokio::test]
    async fn reset_clears_stale_cancel() {
        let handle = CancelHandle::new();
        handle.cancel();
        handle.reset();
        assert!(!handle.is_cancelled());
        let pending = tokio::time::timeout(Duration::from_millis(20), handle.cancelled()).await;
        assert!(pending.is_err(), "cleared flag must not resolve");
    }
}
