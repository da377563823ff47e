//! Deferred work tied to the lifetime of its owner.
//!
//! A [`ScheduledTask`] runs once after a delay on the tokio runtime. Dropping
//! the handle aborts the task if it has not fired yet, so state owned by an
//! unmounted shell is never touched by a stale timer.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;

/// Handle to a delayed task. Aborts the task on drop.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: AbortHandle,
}

impl ScheduledTask {
    /// Run `work` once `delay` has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, work: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        })
        .abort_handle();

        Self { handle }
    }

    /// Whether the task has run to completion or been aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counter_task(delay: Duration, counter: &Arc<AtomicUsize>) -> ScheduledTask {
        let counter = Arc::clone(counter);
        ScheduledTask::after(delay, async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let _task = counter_task(Duration::from_millis(500), &counter);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = counter_task(Duration::from_millis(500), &counter);
        drop(task);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
