//! Tooltip instance state: visibility, delay timers and window listeners.

use std::sync::{Arc, Weak};
use std::time::Duration;

use log::{debug, trace, warn};
use webdom::{Key, Point, Rect, Viewport, WINDOW_TARGET};

use crate::config::TooltipConfig;
use crate::controlled::Controlled;
use crate::handler_context::{
    call_handler, handler, EventData, Handler, HandlerRegistry, RegistryScope,
};
use crate::state::State;
use crate::timer::DelayedTask;

use super::placement::{compute_position, follow_cursor_position, Placement, PositionData, PositionOptions};

/// Trigger events the controller listens to on the trigger element.
pub(crate) const TRIGGER_EVENTS: [&str; 6] = [
    "on_pointer_enter",
    "on_pointer_leave",
    "on_pointer_move",
    "on_focus",
    "on_blur",
    "on_key",
];

const WINDOW_EVENTS: [&str; 2] = ["on_scroll", "on_resize"];

// =============================================================================
// Measure
// =============================================================================

/// Live geometry supplied by the host page.
///
/// Rectangles are read every time the position is recomputed, so they should
/// reflect the current layout (after scrolling, resizing, content changes).
pub trait Measure: Send + Sync {
    fn trigger_rect(&self) -> Rect;
    fn content_rect(&self) -> Rect;
    fn viewport(&self) -> Viewport;
}

/// A `Measure` backed by settable values. Clones share the same values.
#[derive(Debug, Clone, Default)]
pub struct StaticMeasure {
    trigger: State<Rect>,
    content: State<Rect>,
    viewport: State<Viewport>,
}

impl StaticMeasure {
    pub fn new(trigger: Rect, content: Rect, viewport: Viewport) -> Self {
        Self {
            trigger: State::new(trigger),
            content: State::new(content),
            viewport: State::new(viewport),
        }
    }

    pub fn set_trigger(&self, rect: Rect) {
        self.trigger.set(rect);
    }

    pub fn set_content(&self, rect: Rect) {
        self.content.set(rect);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }
}

impl Measure for StaticMeasure {
    fn trigger_rect(&self) -> Rect {
        self.trigger.get()
    }

    fn content_rect(&self) -> Rect {
        self.content.get()
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }
}

// =============================================================================
// Options
// =============================================================================

/// Positioning and timing props, pushed into the controller on every build.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOptions {
    pub placement: Placement,
    pub position: PositionOptions,
    pub follow_cursor: bool,
    pub show_delay: Duration,
    pub hide_delay: Duration,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self::from_config(&TooltipConfig::default())
    }
}

impl TooltipOptions {
    pub fn from_config(config: &TooltipConfig) -> Self {
        Self {
            placement: Placement::Top,
            position: PositionOptions {
                offset: config.offset,
                skidding: config.skidding,
                flip: config.flip,
            },
            follow_cursor: false,
            show_delay: config.show_delay(),
            hide_delay: config.hide_delay(),
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

#[derive(Debug, Clone, Default)]
struct TooltipState {
    position: Option<PositionData>,
    pointer: Option<Point>,
    listening: bool,
}

struct Inner {
    panel_id: String,
    /// Registry the trigger handlers and window listeners live in. Rebound
    /// when a build is handed a different one.
    registry: State<HandlerRegistry>,
    measure: Arc<dyn Measure>,
    options: State<TooltipOptions>,
    /// Controlled visibility prop, if the caller supplies one.
    open: State<Option<bool>>,
    on_visibility_change: State<Option<Handler>>,
    visible: Controlled<bool>,
    state: State<TooltipState>,
    show_timer: DelayedTask,
    hide_timer: DelayedTask,
}

impl Inner {
    fn is_visible(&self) -> bool {
        self.visible.resolve(self.open.get().as_ref())
    }

    /// Ask for a visibility change. Uncontrolled instances apply it right
    /// away; controlled ones only announce it and wait for the prop.
    fn request_visible(self: &Arc<Self>, next: bool) {
        let open = self.open.get();
        if self.visible.resolve(open.as_ref()) == next {
            return;
        }
        self.visible.request(open.as_ref(), next);
        if open.is_none() {
            self.apply(next);
        }
        if let Some(callback) = self.on_visibility_change.get() {
            call_handler(&callback, &self.panel_id, EventData::Visibility(next));
        }
    }

    /// Bring listeners and position in line with the resolved visibility.
    fn sync(self: &Arc<Self>) {
        let visible = self.is_visible();
        let listening = self.state.with(|s| s.listening);
        if visible && !listening {
            self.apply(true);
        } else if !visible && listening {
            self.apply(false);
        }
    }

    fn apply(self: &Arc<Self>, visible: bool) {
        if visible {
            self.reposition();
            self.attach();
        } else {
            self.detach();
        }
    }

    fn attach(self: &Arc<Self>) {
        let registry = self.registry.get();
        for event in WINDOW_EVENTS {
            let weak: Weak<Inner> = Arc::downgrade(self);
            registry.add_listener(
                WINDOW_TARGET,
                event,
                &self.panel_id,
                handler(move |_| {
                    if let Some(inner) = weak.upgrade() {
                        inner.reposition();
                    }
                }),
            );
        }
        self.state.update(|s| s.listening = true);
        debug!("tooltip {} attached window listeners", self.panel_id);
    }

    fn detach(&self) {
        let listening = self.state.with(|s| s.listening);
        if !listening {
            return;
        }
        let registry = self.registry.get();
        for event in WINDOW_EVENTS {
            registry.remove_listener(WINDOW_TARGET, event, &self.panel_id);
        }
        self.state.update(|s| s.listening = false);
        debug!("tooltip {} detached window listeners", self.panel_id);
    }

    fn reposition(&self) {
        let options = self.options.get();
        let content = self.measure.content_rect();
        let viewport = self.measure.viewport();

        let position = if options.follow_cursor {
            let pointer = self
                .state
                .with(|s| s.pointer)
                .unwrap_or_else(|| self.measure.trigger_rect().center());
            follow_cursor_position(pointer, content, options.position.offset, viewport)
        } else {
            let position = compute_position(
                self.measure.trigger_rect(),
                content,
                options.placement,
                &options.position,
                viewport,
            );
            if position.placement != options.placement {
                debug!(
                    "tooltip {} flipped from {} to {}",
                    self.panel_id, options.placement, position.placement
                );
            }
            position
        };

        trace!("tooltip {} at ({}, {})", self.panel_id, position.x, position.y);
        self.state.update(|s| s.position = Some(position));
    }

    fn cancel_timers(&self) {
        self.show_timer.cancel();
        self.hide_timer.cancel();
    }

    fn unregister_trigger(&self) {
        self.registry.with(|registry| registry.release(&self.panel_id));
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel_timers();
        self.detach();
    }
}

/// Owns one tooltip instance: visibility, last position, delay timers and the
/// scroll/resize listeners that keep the position current while visible.
///
/// Clones refer to the same instance. Handlers registered by the controller
/// hold weak references, so dropping the last clone cancels pending timers
/// and detaches listeners.
///
/// # Example
///
/// ```ignore
/// let measure = StaticMeasure::new(trigger_rect, panel_rect, Viewport::new(800.0, 600.0));
/// let tip = TooltipController::new(&registry, Arc::new(measure));
///
/// let element = Tooltip::new()
///     .text("Copy link")
///     .trigger(Element::button("Share"))
///     .controller(&tip)
///     .build(&registry, &handlers);
/// ```
#[derive(Clone)]
pub struct TooltipController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TooltipController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooltipController")
            .field("id", &self.inner.panel_id)
            .field("visible", &self.is_visible())
            .finish()
    }
}

impl TooltipController {
    /// Create a controller with a generated panel id.
    pub fn new(registry: &HandlerRegistry, measure: Arc<dyn Measure>) -> Self {
        Self::with_id(
            format!("tooltip-{}", uuid::Uuid::new_v4().simple()),
            registry,
            measure,
        )
    }

    pub fn with_id(
        id: impl Into<String>,
        registry: &HandlerRegistry,
        measure: Arc<dyn Measure>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                panel_id: id.into(),
                registry: State::new(registry.clone()),
                measure,
                options: State::new(TooltipOptions::default()),
                open: State::new(None),
                on_visibility_change: State::new(None),
                visible: Controlled::new(false),
                state: State::default(),
                show_timer: DelayedTask::new(),
                hide_timer: DelayedTask::new(),
            }),
        }
    }

    /// Id of the floating panel element.
    pub fn id(&self) -> &str {
        &self.inner.panel_id
    }

    pub fn options(&self) -> TooltipOptions {
        self.inner.options.get()
    }

    pub fn set_options(&self, options: TooltipOptions) {
        self.inner.options.set(options);
    }

    /// Supply (or withdraw, with `None`) the controlled visibility prop.
    pub fn set_open(&self, open: Option<bool>) {
        self.inner.open.set(open);
        self.inner.sync();
    }

    pub fn set_on_visibility_change(&self, callback: Option<Handler>) {
        self.inner.on_visibility_change.set(callback);
    }

    pub fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }

    /// Last computed position, if the tooltip has been shown.
    pub fn position(&self) -> Option<PositionData> {
        self.inner.state.with(|s| s.position)
    }

    pub fn is_listening(&self) -> bool {
        self.inner.state.with(|s| s.listening)
    }

    pub fn is_show_pending(&self) -> bool {
        self.inner.show_timer.is_pending()
    }

    pub fn is_hide_pending(&self) -> bool {
        self.inner.hide_timer.is_pending()
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Pointer entered or focus moved onto the trigger.
    pub fn pointer_enter(&self) {
        self.inner.hide_timer.cancel();
        let delay = self.inner.options.with(|o| o.show_delay);
        if delay.is_zero() {
            self.inner.show_timer.cancel();
            self.inner.request_visible(true);
            return;
        }
        let weak = Arc::downgrade(&self.inner);
        self.inner.show_timer.schedule(delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.request_visible(true);
            }
        });
    }

    /// Pointer left or focus moved off the trigger.
    pub fn pointer_leave(&self) {
        self.inner.show_timer.cancel();
        let delay = self.inner.options.with(|o| o.hide_delay);
        if delay.is_zero() {
            self.inner.hide_timer.cancel();
            self.inner.request_visible(false);
            return;
        }
        let weak = Arc::downgrade(&self.inner);
        self.inner.hide_timer.schedule(delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.request_visible(false);
            }
        });
    }

    /// Track the pointer. Only follow-cursor tooltips reposition.
    pub fn pointer_move(&self, x: f32, y: f32) {
        self.inner
            .state
            .update(|s| s.pointer = Some(Point::new(x, y)));
        let follow = self.inner.options.with(|o| o.follow_cursor);
        if follow && self.is_visible() {
            self.inner.reposition();
        }
    }

    /// Key pressed on the trigger. Escape hides immediately.
    pub fn key(&self, key: Key) {
        if key == Key::Escape {
            self.hide_now();
        }
    }

    /// Show without waiting for the show delay.
    pub fn show_now(&self) {
        self.inner.cancel_timers();
        self.inner.request_visible(true);
    }

    /// Hide without waiting for the hide delay.
    pub fn hide_now(&self) {
        self.inner.cancel_timers();
        self.inner.request_visible(false);
    }

    /// Recompute the position from fresh measurements.
    pub fn reposition(&self) {
        self.inner.reposition();
    }

    /// Tear down: cancel timers, detach window listeners and remove trigger
    /// handlers. Local visibility resets to hidden, so a later build starts
    /// from scratch.
    pub fn unmount(&self) {
        self.inner.cancel_timers();
        self.inner.detach();
        self.inner.unregister_trigger();
        self.inner.visible.request(None, false);
        debug!("tooltip {} unmounted", self.inner.panel_id);
    }

    /// Whether the controller registers into `registry`.
    pub fn is_bound_to(&self, registry: &HandlerRegistry) -> bool {
        self.inner.registry.with(|own| own.same_as(registry))
    }

    /// Move trigger handlers and window listeners into `registry`.
    pub(crate) fn bind(&self, registry: &HandlerRegistry) {
        if self.is_bound_to(registry) {
            return;
        }
        warn!(
            "tooltip {} built with a different registry than it was created with, rebinding",
            self.inner.panel_id
        );
        self.inner.detach();
        self.inner.unregister_trigger();
        self.inner.registry.set(registry.clone());
    }

    // -------------------------------------------------------------------------
    // Trigger wiring
    // -------------------------------------------------------------------------

    /// Register the trigger's event handlers under `trigger_id`.
    pub(crate) fn register_trigger(&self, registry: &RegistryScope, trigger_id: &str) {
        for event in TRIGGER_EVENTS {
            let weak = Arc::downgrade(&self.inner);
            let on_event = handler(move |cx| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let controller = TooltipController { inner };
                match event {
                    "on_pointer_enter" | "on_focus" => controller.pointer_enter(),
                    "on_pointer_leave" | "on_blur" => controller.pointer_leave(),
                    "on_pointer_move" => {
                        if let Some((x, y)) = cx.event().pointer() {
                            controller.pointer_move(x, y);
                        }
                    }
                    "on_key" => {
                        if let Some(key) = cx.event().key() {
                            controller.key(key);
                        }
                    }
                    _ => {}
                }
            });
            registry.register(trigger_id, event, on_event);
        }
    }
}
