//! Tooltip widget - a floating panel anchored to a trigger element.

mod controller;
mod placement;

pub use controller::{Measure, StaticMeasure, TooltipController, TooltipOptions};
pub use placement::{
    arrow_position, candidates, compute_position, follow_cursor_position, place, Alignment,
    Placement, PositionData, PositionOptions, Side, ARROW_EDGE_OFFSET,
};

use std::time::Duration;

use webdom::Element;

use crate::config::TooltipConfig;
use crate::types::modifier;
use crate::{HandlerRegistry, WidgetHandlers};

/// Typestate marker: tooltip needs a controller.
pub struct NeedsController;

/// Typestate marker: tooltip has a controller.
pub struct HasController<'a>(&'a TooltipController);

/// A tooltip widget builder.
///
/// Wraps the trigger in a `span.tooltip-wrapper` and renders the panel next to
/// it. Position and visibility come from the `TooltipController`, which must
/// be supplied before `build()`.
///
/// # Example
///
/// ```ignore
/// let tip = TooltipController::new(&registry, measure);
/// Tooltip::new()
///     .text("Saved 2 minutes ago")
///     .placement(Placement::BottomStart)
///     .trigger(Element::button("Status"))
///     .controller(&tip)
///     .build(&registry, &handlers)
/// ```
pub struct Tooltip<S = NeedsController> {
    state_marker: S,
    content: Option<Element>,
    trigger: Option<Element>,
    options: TooltipOptions,
    arrow: bool,
    disabled: bool,
    open: Option<bool>,
    max_width: Option<f32>,
}

impl Default for Tooltip<NeedsController> {
    fn default() -> Self {
        Self::new()
    }
}

impl Tooltip<NeedsController> {
    pub fn new() -> Self {
        Self {
            state_marker: NeedsController,
            content: None,
            trigger: None,
            options: TooltipOptions::default(),
            arrow: true,
            disabled: false,
            open: None,
            max_width: None,
        }
    }

    /// Set the controller. Required before calling `build()`.
    pub fn controller(self, controller: &TooltipController) -> Tooltip<HasController<'_>> {
        Tooltip {
            state_marker: HasController(controller),
            content: self.content,
            trigger: self.trigger,
            options: self.options,
            arrow: self.arrow,
            disabled: self.disabled,
            open: self.open,
            max_width: self.max_width,
        }
    }
}

impl<S> Tooltip<S> {
    /// Take offset, skidding, flip and delays from a config.
    pub fn with_config(mut self, config: &TooltipConfig) -> Self {
        let placement = self.options.placement;
        let follow_cursor = self.options.follow_cursor;
        self.options = TooltipOptions {
            placement,
            follow_cursor,
            ..TooltipOptions::from_config(config)
        };
        self
    }

    /// Plain-text panel content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(Element::text(text));
        self
    }

    /// Arbitrary panel content.
    pub fn content(mut self, content: Element) -> Self {
        self.content = Some(content);
        self
    }

    /// The element the tooltip describes.
    pub fn trigger(mut self, trigger: Element) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.options.placement = placement;
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.options.position.offset = offset;
        self
    }

    pub fn skidding(mut self, skidding: f32) -> Self {
        self.options.position.skidding = skidding;
        self
    }

    pub fn flip(mut self, flip: bool) -> Self {
        self.options.position.flip = flip;
        self
    }

    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Position at the pointer instead of the trigger.
    pub fn follow_cursor(mut self) -> Self {
        self.options.follow_cursor = true;
        self
    }

    pub fn show_delay(mut self, delay: Duration) -> Self {
        self.options.show_delay = delay;
        self
    }

    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.options.hide_delay = delay;
        self
    }

    /// Disabled tooltips never show and register no handlers.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Drive visibility from outside. Interaction then only invokes
    /// `on_visibility_change`.
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

impl<'a> Tooltip<HasController<'a>> {
    /// Build the wrapper, trigger and panel elements.
    ///
    /// Registers pointer, focus and key handlers on the trigger unless
    /// disabled. Handlers: `on_visibility_change`.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let controller = self.state_marker.0;
        let panel_id = controller.id().to_string();
        let follow_cursor = self.options.follow_cursor;
        let requested = self.options.placement;

        let trigger = self.trigger.unwrap_or_else(Element::span);
        let trigger_id = trigger
            .id
            .clone()
            .unwrap_or_else(|| format!("{panel_id}-trigger"));

        controller.bind(registry);
        let registry = registry.scope(&panel_id);
        controller.set_options(self.options);
        controller.set_on_visibility_change(handlers.get("on_visibility_change").cloned());

        if self.disabled {
            controller.unmount();
        } else {
            controller.register_trigger(&registry, &trigger_id);
        }
        let was_listening = controller.is_listening();
        controller.set_open(if self.disabled { Some(false) } else { self.open });

        let visible = controller.is_visible();
        if visible && was_listening {
            // already shown, but placement or offsets may have changed
            controller.reposition();
        }
        let position = controller.position().filter(|_| visible);
        let placement = position.map_or(requested, |p| p.placement);

        let trigger = trigger
            .id(&trigger_id)
            .aria("controls", &panel_id)
            .aria("expanded", visible.to_string());
        let trigger = if visible {
            trigger.aria("describedby", &panel_id)
        } else {
            trigger
        };

        let mut style = match position {
            Some(pos) => format!("left: {}px; top: {}px;", pos.x, pos.y),
            None => String::new(),
        };
        if let Some(width) = self.max_width {
            if !style.is_empty() {
                style.push(' ');
            }
            style.push_str(&format!("max-width: {width}px;"));
        }

        let arrow = match position {
            Some(pos) if self.arrow && !follow_cursor => Some(
                Element::span()
                    .class("tooltip__arrow")
                    .aria("hidden", "true")
                    .attr("style", format!("left: {}px; top: {}px;", pos.arrow_x, pos.arrow_y)),
            ),
            _ => None,
        };

        let mut panel = Element::div()
            .id(&panel_id)
            .class("tooltip")
            .class(modifier("tooltip", placement.as_str()))
            .class_if(follow_cursor, "tooltip--follow-cursor")
            .role("tooltip")
            .flag_if(!visible, "hidden")
            .maybe_child(self.content)
            .maybe_child(arrow);
        if !style.is_empty() {
            panel = panel.attr("style", style);
        }

        Element::span()
            .class("tooltip-wrapper")
            .child(trigger)
            .child(panel)
    }
}
