//! Values that are either driven by a prop or owned by the widget instance.

use crate::state::State;

/// Local fallback for a value that a prop may control.
///
/// When the caller supplies the value, that value is the single source of
/// truth: reads return it and interaction requests never touch local state.
/// When the prop is absent the instance owns the value, seeded once from the
/// default given at construction.
///
/// # Example
///
/// ```ignore
/// let open = Controlled::new(false);
///
/// // uncontrolled: the widget keeps its own copy
/// open.request(None, true);
/// assert!(open.resolve(None));
///
/// // controlled: the prop wins, local state is left alone
/// assert!(!open.resolve(Some(&false)));
/// ```
#[derive(Debug, Clone)]
pub struct Controlled<T> {
    local: State<T>,
}

impl<T: Clone> Controlled<T> {
    pub fn new(default: T) -> Self {
        Self {
            local: State::new(default),
        }
    }

    /// The value to display for this render.
    pub fn resolve(&self, external: Option<&T>) -> T {
        match external {
            Some(value) => value.clone(),
            None => self.local.get(),
        }
    }

    /// Apply a change requested by user interaction.
    ///
    /// Stores `next` locally only when uncontrolled. Returns `next` so the
    /// caller can announce it through its change callback either way.
    pub fn request(&self, external: Option<&T>, next: T) -> T {
        if external.is_none() {
            self.local.set(next.clone());
        }
        next
    }

    /// Update the local value in place when uncontrolled.
    ///
    /// For controlled values the closure runs on a copy of the external value
    /// and the result is returned without being stored.
    pub fn request_with(&self, external: Option<&T>, f: impl FnOnce(&mut T)) -> T {
        match external {
            Some(value) => {
                let mut next = value.clone();
                f(&mut next);
                next
            }
            None => self.local.modify(|value| {
                f(value);
                value.clone()
            }),
        }
    }

    pub fn is_controlled(external: Option<&T>) -> bool {
        external.is_some()
    }
}

impl<T: Clone + Default> Default for Controlled<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
