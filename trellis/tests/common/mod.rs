//! Shared helpers for widget tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use trellis::{handler, EventData, Handler, WidgetHandlers};

/// Records every payload a callback receives.
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<EventData>>>);

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self) -> Handler {
        let calls = self.0.clone();
        handler(move |cx| calls.lock().unwrap().push(cx.event().clone()))
    }

    pub fn events(&self) -> Vec<EventData> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<EventData> {
        self.0.lock().unwrap().last().cloned()
    }
}

/// Build a handler map from `(name, recorder)` pairs.
pub fn handlers(entries: &[(&'static str, &Calls)]) -> WidgetHandlers {
    entries
        .iter()
        .map(|(name, calls)| (*name, calls.handler()))
        .collect()
}
