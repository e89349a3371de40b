//! Shared, interior-mutable widget state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

struct Shared<T> {
    value: RwLock<T>,
    dirty: AtomicBool,
}

/// A value shared between a widget, its handlers and its delayed tasks.
///
/// Clones point at the same value. Every write raises a dirty flag the host
/// can poll to decide whether to rebuild. A poisoned lock is recovered rather
/// than propagated, since a panicking handler must not wedge the page.
///
/// # Example
///
/// ```ignore
/// let open = State::new(false);
/// let handle = open.clone();
/// registry.register("menu-toggle", "on_click", handler(move |_| {
///     handle.update(|v| *v = !*v);
/// }));
/// ```
pub struct State<T> {
    shared: Arc<Shared<T>>,
}

impl<T> State<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(value),
                dirty: AtomicBool::new(false),
            }),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.shared.dirty.store(true, Ordering::Release);
        self.shared
            .value
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone out the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self
            .shared
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn set(&self, value: T) {
        *self.write() = value;
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.write());
    }

    /// Like `update`, but hands back what the closure returns.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.write())
    }

    /// Whether anything was written since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::Acquire)
    }

    pub fn clear_dirty(&self) {
        self.shared.dirty.store(false, Ordering::Release);
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with(|value| f.debug_struct("State").field("value", value).finish())
    }
}
