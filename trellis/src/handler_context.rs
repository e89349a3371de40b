//! Handler types, event payloads and the per-render handler registry.
//!
//! This module provides:
//! - `Handler`: closure type for both caller callbacks and internal widget handlers
//! - `EventData`: the payload a handler reads through `HandlerContext::event()`
//! - `HandlerRegistry`: stores widget event handlers keyed by (element_id, event_type)
//! - `RegistryScope`: registers on behalf of one widget build
//!
//! Widgets register handlers for their interactive elements while building,
//! through a scope that replaces what their previous build registered.
//! The host page forwards DOM events with `HandlerRegistry::dispatch` (or
//! `dispatch_event` for a `webdom::Event`), which runs the matching handler.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::trace;
use webdom::{Event, Key};

use crate::types::SortDirection;
use crate::widgets::search::SuggestionKind;

// =============================================================================
// Handler Type
// =============================================================================

/// A handler closure that receives a HandlerContext.
pub type Handler = Arc<dyn Fn(&HandlerContext) + Send + Sync>;

/// Map of handler names to handlers, used for passing callbacks to widgets.
///
/// Standard handler names:
/// - `"on_navigate"` - link or lesson navigation
/// - `"on_select"` - suggestion, plan or option chosen
/// - `"on_search"` - debounced query committed
/// - `"on_submit"` - query submitted with Enter
/// - `"on_page_change"` - pagination page requested
/// - `"on_filter_change"` - active filter ids changed
/// - `"on_sort"` / `"on_sort_change"` - sort column or option changed
/// - `"on_toggle"` - dropdown/section expanded or collapsed
/// - `"on_row_click"` - table row activated
/// - `"on_clear"` / `"on_change"` - search input cleared or edited
/// - `"on_visibility_change"` - tooltip shown or hidden
pub type WidgetHandlers = HashMap<&'static str, Handler>;

/// Wrap a closure as a `Handler`.
pub fn handler(f: impl Fn(&HandlerContext) + Send + Sync + 'static) -> Handler {
    Arc::new(f)
}

/// Invoke `handler` directly with a payload.
pub fn call_handler(handler: &Handler, element_id: &str, data: EventData) {
    let cx = HandlerContext::new(element_id, data);
    handler(&cx);
}

/// Invoke the caller callback `name` from `handlers`, if one was supplied.
pub fn emit(handlers: &WidgetHandlers, name: &str, element_id: &str, data: EventData) -> bool {
    match handlers.get(name) {
        Some(handler) => {
            call_handler(handler, element_id, data);
            true
        }
        None => false,
    }
}

// =============================================================================
// Event Data
// =============================================================================

/// Event-specific data passed to handlers via HandlerContext.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventData {
    /// No event data.
    #[default]
    None,
    /// Text input value changed.
    Change {
        /// The new text value.
        text: String,
    },
    /// Key pressed on the focused element.
    Key(Key),
    /// Pointer position in viewport coordinates.
    Pointer { x: f32, y: f32 },
    /// Page scrolled.
    Scroll { x: f32, y: f32 },
    /// Viewport resized.
    Viewport { width: f32, height: f32 },
    /// A pagination page was requested.
    Page(u32),
    /// A search query (debounced commit or submit).
    Query(String),
    /// An item (plan, option) was chosen.
    Select { id: String, label: String },
    /// A search suggestion was chosen.
    Suggestion {
        id: String,
        label: String,
        kind: SuggestionKind,
    },
    /// A link was followed.
    Navigate { id: Option<String>, href: String },
    /// The full set of active filter ids after a change.
    Filters(Vec<String>),
    /// Sort column/option changed. `None` direction clears sorting.
    Sort {
        column: String,
        direction: Option<SortDirection>,
    },
    /// A table row was clicked.
    Row(String),
    /// Something identified by `id` was expanded or collapsed.
    Toggle { id: String, expanded: bool },
    /// Visibility changed.
    Visibility(bool),
}

impl EventData {
    /// Get the changed text from a Change event.
    pub fn text(&self) -> Option<&str> {
        match self {
            EventData::Change { text } => Some(text),
            _ => None,
        }
    }

    /// Get the key from a Key event.
    pub fn key(&self) -> Option<Key> {
        match self {
            EventData::Key(key) => Some(*key),
            _ => None,
        }
    }

    /// Get the requested page from a Page event.
    pub fn page(&self) -> Option<u32> {
        match self {
            EventData::Page(page) => Some(*page),
            _ => None,
        }
    }

    /// Get the query from a Query event.
    pub fn query(&self) -> Option<&str> {
        match self {
            EventData::Query(query) => Some(query),
            _ => None,
        }
    }

    /// Get the pointer position from a Pointer event.
    pub fn pointer(&self) -> Option<(f32, f32)> {
        match self {
            EventData::Pointer { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}

impl From<&Event> for EventData {
    fn from(event: &Event) -> Self {
        match event {
            Event::Input { value, .. } => EventData::Change {
                text: value.clone(),
            },
            Event::Key { key, .. } => EventData::Key(*key),
            Event::PointerMove { x, y, .. } => EventData::Pointer { x: *x, y: *y },
            Event::Scroll { x, y } => EventData::Scroll { x: *x, y: *y },
            Event::Resize { width, height } => EventData::Viewport {
                width: *width,
                height: *height,
            },
            Event::Click { .. }
            | Event::PointerEnter { .. }
            | Event::PointerLeave { .. }
            | Event::Focus { .. }
            | Event::Blur { .. } => EventData::None,
        }
    }
}

// =============================================================================
// HandlerRegistry
// =============================================================================

/// Registry for widget event handlers.
///
/// Maps (element_id, event_type) to handler closures. Widgets register
/// through a `RegistryScope` keyed by their root id; opening the scope again
/// on the next build drops everything the previous build registered, so
/// controls that became disabled or disappeared stop responding.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<(String, String), Entry>>>,
    /// Extra listeners on shared targets such as `window`, keyed by owner so
    /// several widgets can listen to the same event.
    listeners: Arc<RwLock<ListenerMap>>,
}

type ListenerMap = HashMap<(String, String), Vec<(String, Handler)>>;

#[derive(Clone)]
struct Entry {
    handler: Handler,
    /// Root id of the widget build that registered the handler.
    owner: Option<String>,
}

fn registry_key(target: &str, event: &str) -> (String, String) {
    (target.to_string(), event.to_string())
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an element event.
    ///
    /// # Arguments
    /// - `element_id`: The element's id
    /// - `event`: The event type (e.g., "on_click", "on_input")
    /// - `handler`: The handler closure
    pub fn register(&self, element_id: &str, event: &str, handler: Handler) {
        self.insert(element_id, event, handler, None);
    }

    fn insert(&self, element_id: &str, event: &str, handler: Handler, owner: Option<&str>) {
        if let Ok(mut handlers) = self.handlers.write() {
            let entry = Entry {
                handler,
                owner: owner.map(str::to_string),
            };
            handlers.insert(registry_key(element_id, event), entry);
        }
    }

    /// Start registering on behalf of `owner`, dropping whatever `owner`
    /// registered before.
    pub fn scope(&self, owner: &str) -> RegistryScope {
        let released = self.release(owner);
        if released > 0 {
            trace!("released {released} handlers of {owner}");
        }
        RegistryScope {
            registry: self.clone(),
            owner: owner.to_string(),
        }
    }

    /// Remove every handler registered by `owner`. Returns how many went.
    pub fn release(&self, owner: &str) -> usize {
        let Ok(mut handlers) = self.handlers.write() else {
            return 0;
        };
        let before = handlers.len();
        handlers.retain(|_, entry| entry.owner.as_deref() != Some(owner));
        before - handlers.len()
    }

    /// Whether both values refer to the same underlying registry.
    pub fn same_as(&self, other: &HandlerRegistry) -> bool {
        Arc::ptr_eq(&self.handlers, &other.handlers)
    }

    /// Remove a handler. Returns whether one was registered.
    pub fn unregister(&self, element_id: &str, event: &str) -> bool {
        self.handlers
            .write()
            .map(|mut handlers| {
                handlers
                    .remove(&registry_key(element_id, event))
                    .is_some()
            })
            .unwrap_or(false)
    }

    /// Get a handler for an element event.
    pub fn get(&self, element_id: &str, event: &str) -> Option<Handler> {
        self.handlers
            .read()
            .ok()?
            .get(&registry_key(element_id, event))
            .map(|entry| entry.handler.clone())
    }

    /// Check whether a handler is registered for an element event.
    pub fn contains(&self, element_id: &str, event: &str) -> bool {
        self.handlers
            .read()
            .map(|h| h.contains_key(&registry_key(element_id, event)))
            .unwrap_or(false)
    }

    /// Add a listener owned by `owner` on a shared target. Replaces an earlier
    /// listener from the same owner.
    pub fn add_listener(&self, target: &str, event: &str, owner: &str, handler: Handler) {
        if let Ok(mut listeners) = self.listeners.write() {
            let entry = listeners.entry(registry_key(target, event)).or_default();
            entry.retain(|(existing, _)| existing != owner);
            entry.push((owner.to_string(), handler));
        }
    }

    /// Remove `owner`'s listener. Returns whether one was registered.
    pub fn remove_listener(&self, target: &str, event: &str, owner: &str) -> bool {
        let Ok(mut listeners) = self.listeners.write() else {
            return false;
        };
        let k = registry_key(target, event);
        let Some(entry) = listeners.get_mut(&k) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|(existing, _)| existing != owner);
        let removed = entry.len() != before;
        if entry.is_empty() {
            listeners.remove(&k);
        }
        removed
    }

    pub fn has_listener(&self, target: &str, event: &str, owner: &str) -> bool {
        self.listeners
            .read()
            .map(|l| {
                l.get(&registry_key(target, event))
                    .is_some_and(|entry| entry.iter().any(|(existing, _)| existing == owner))
            })
            .unwrap_or(false)
    }

    /// Number of listeners on a shared target event.
    pub fn listener_count(&self, target: &str, event: &str) -> usize {
        self.listeners
            .read()
            .map(|l| l.get(&registry_key(target, event)).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Run the handler and any listeners for an element event. Returns
    /// whether anything ran.
    ///
    /// Registry locks are released before handlers run, so handlers may
    /// register or unregister other handlers.
    pub fn dispatch(&self, element_id: &str, event: &str, data: EventData) -> bool {
        let handler = self.get(element_id, event);
        let listeners: Vec<Handler> = self
            .listeners
            .read()
            .map(|l| {
                l.get(&registry_key(element_id, event))
                    .map(|entry| entry.iter().map(|(_, h)| h.clone()).collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default();

        if handler.is_none() && listeners.is_empty() {
            trace!("no handler for {element_id}/{event}");
            return false;
        }
        if let Some(handler) = handler {
            call_handler(&handler, element_id, data.clone());
        }
        for listener in listeners {
            call_handler(&listener, element_id, data.clone());
        }
        true
    }

    /// Dispatch a host event to its target's handler.
    pub fn dispatch_event(&self, event: &Event) -> bool {
        match event.target() {
            Some(target) => self.dispatch(target, event.handler_name(), EventData::from(event)),
            None => false,
        }
    }

    /// Clear all handlers and listeners.
    pub fn clear(&self) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.clear();
        }
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.clear();
        }
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers
            .read()
            .map(|h| h.is_empty())
            .unwrap_or(true)
    }

    /// Get the number of registered element handlers (listeners excluded).
    pub fn len(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &count)
            .finish()
    }
}

/// Registration handle for one widget build, created by
/// `HandlerRegistry::scope`.
#[derive(Clone)]
pub struct RegistryScope {
    registry: HandlerRegistry,
    owner: String,
}

impl RegistryScope {
    /// Register a handler owned by this scope.
    pub fn register(&self, element_id: &str, event: &str, handler: Handler) {
        self.registry
            .insert(element_id, event, handler, Some(&self.owner));
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for RegistryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryScope")
            .field("owner", &self.owner)
            .finish()
    }
}

/// Context passed to every handler.
pub struct HandlerContext<'a> {
    element_id: &'a str,
    event_data: EventData,
}

impl<'a> HandlerContext<'a> {
    pub fn new(element_id: &'a str, event_data: EventData) -> Self {
        Self {
            element_id,
            event_data,
        }
    }

    /// Id of the element the event fired on.
    pub fn element_id(&self) -> &str {
        self.element_id
    }

    /// Get the event data.
    ///
    /// Returns `EventData::None` if no event data was provided.
    pub fn event(&self) -> &EventData {
        &self.event_data
    }
}
