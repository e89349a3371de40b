//! Cancellable delayed tasks for debouncing and show/hide delays.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{trace, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct TaskSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// A single pending action that runs after a delay.
///
/// Scheduling again cancels whatever was pending, so only the most recently
/// scheduled action can ever run. Cancellation aborts the tokio task and bumps
/// a generation counter that the task re-checks before running, which covers
/// a task that already woke up but has not run its action yet.
///
/// Clones share the same slot. The pending task is aborted once the last
/// clone is dropped.
///
/// # Example
///
/// ```ignore
/// let debounce = DelayedTask::new();
/// for query in ["r", "ru", "rus"] {
///     let q = query.to_string();
///     debounce.schedule(Duration::from_millis(300), move || search(q));
/// }
/// // only `search("rus")` runs, 300ms after the last call
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelayedTask {
    slot: Arc<Mutex<TaskSlot>>,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TaskSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `action` after `delay`, replacing any pending action.
    ///
    /// Outside a tokio runtime there is nothing to drive the timer, so the
    /// action runs immediately.
    pub fn schedule<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime, running delayed task immediately");
            self.cancel();
            action();
            return;
        };

        let mut slot = self.lock();
        if let Some(previous) = slot.handle.take() {
            previous.abort();
        }
        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;
        let weak = Arc::downgrade(&self.slot);

        trace!("scheduling delayed task #{generation} in {delay:?}");
        slot.handle = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(slot) = weak.upgrade() else {
                return;
            };
            {
                let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.generation != generation {
                    return;
                }
                slot.handle = None;
            }
            action();
        }));
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        let mut slot = self.lock();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(handle) = slot.handle.take() {
            trace!("cancelled delayed task");
            handle.abort();
        }
    }

    /// Whether an action is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.lock()
            .handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
