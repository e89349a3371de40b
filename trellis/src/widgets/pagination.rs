//! Pagination widget - page buttons with a collapsing window.

use log::{debug, warn};
use webdom::Element;

use crate::config::PaginationConfig;
use crate::handler_context::{call_handler, handler, EventData, Handler};
use crate::types::{modifier, WidgetSize};
use crate::{HandlerRegistry, RegistryScope, WidgetHandlers};

/// One slot of the rendered page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Ellipsis,
}

/// Compute which page numbers to show.
///
/// `current` is clamped into `1..=total`. When all pages fit in
/// `max(max_visible, 3)` they are all shown; otherwise page 1 and the last
/// page are always present, the remaining slots form a window around
/// `current`, and gaps are marked with `Ellipsis`. Never yields more page
/// numbers than `max(max_visible, 3)`.
///
/// # Example
///
/// ```ignore
/// use PageSlot::*;
/// assert_eq!(
///     page_window(5, 10, 5),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)],
/// );
/// ```
pub fn page_window(current: u32, total: u32, max_visible: usize) -> Vec<PageSlot> {
    if total == 0 {
        return Vec::new();
    }

    let max_visible = u32::try_from(max_visible.max(3)).unwrap_or(u32::MAX);
    let current = current.clamp(1, total);

    if total <= max_visible {
        return (1..=total).map(PageSlot::Page).collect();
    }

    // Slots between the first and last page.
    let inner = max_visible - 2;
    let mut start = current.saturating_sub((inner - 1) / 2).max(2);
    let mut end = start + inner - 1;
    if end > total - 1 {
        end = total - 1;
        start = end + 1 - inner;
    }

    let mut slots = vec![PageSlot::Page(1)];
    if start > 2 {
        slots.push(PageSlot::Ellipsis);
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total - 1 {
        slots.push(PageSlot::Ellipsis);
    }
    slots.push(PageSlot::Page(total));
    slots
}

/// Parse a jump-to-page request. `None` when unparsable or out of range.
pub fn parse_jump(input: &str, total: u32) -> Option<u32> {
    let page = input.trim().parse::<u32>().ok()?;
    (1..=total).contains(&page).then_some(page)
}

/// A pagination widget builder.
///
/// Stateless: the caller owns the current page and updates it from
/// `on_page_change`. Requests for the current page or outside `1..=total`
/// are ignored.
///
/// # Example
///
/// ```ignore
/// Pagination::new()
///     .current(page)
///     .total(42)
///     .show_first_last(true)
///     .build(&registry, &handlers)
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pagination {
    id: Option<String>,
    current: u32,
    total: u32,
    max_visible: Option<usize>,
    show_first_last: bool,
    show_summary: bool,
    show_jump: bool,
    disabled: bool,
    size: WidgetSize,
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            current: 1,
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: &PaginationConfig) -> Self {
        self.max_visible = Some(config.max_visible);
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn current(mut self, page: u32) -> Self {
        self.current = page;
        self
    }

    pub fn total(mut self, pages: u32) -> Self {
        self.total = pages;
        self
    }

    pub fn max_visible(mut self, max: usize) -> Self {
        self.max_visible = Some(max);
        self
    }

    pub fn show_first_last(mut self, show: bool) -> Self {
        self.show_first_last = show;
        self
    }

    /// Show a "Page X of Y" summary.
    pub fn show_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    /// Show a jump-to-page input.
    pub fn show_jump(mut self, show: bool) -> Self {
        self.show_jump = show;
        self
    }

    /// Disabled pagination registers no handlers.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn size(mut self, size: WidgetSize) -> Self {
        self.size = size;
        self
    }

    /// Build the pagination element.
    ///
    /// Handlers: `on_page_change` with `EventData::Page`.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let id = self.id.unwrap_or_else(|| "pagination".into());
        let registry = registry.scope(&id);
        let nav = Element::new("nav")
            .id(&id)
            .class("pagination")
            .class(modifier("pagination", self.size.as_str()))
            .aria("label", "Pagination");

        if self.total == 0 {
            return nav;
        }

        let total = self.total;
        let current = self.current.clamp(1, total);
        let max_visible = self
            .max_visible
            .unwrap_or(PaginationConfig::default().max_visible);
        let on_change = if self.disabled {
            None
        } else {
            handlers.get("on_page_change").cloned()
        };

        // Register a click handler that requests `target`, unless it is a
        // no-op (current page) or there is nobody to tell.
        let nav_button = |suffix: &str, label: &str, text: &str, target: Option<u32>| {
            let button_id = format!("{id}-{suffix}");
            let enabled = !self.disabled && target.is_some_and(|t| t != current);
            if let (true, Some(page), Some(callback)) = (enabled, target, &on_change) {
                register_page(&registry, &button_id, page, callback.clone());
            }
            Element::button(text)
                .id(&button_id)
                .class("pagination__control")
                .class(format!("pagination__{suffix}"))
                .aria("label", label)
                .aria("disabled", (!enabled).to_string())
                .flag_if(!enabled, "disabled")
        };

        let mut list = Element::list().class("pagination__list");

        if self.show_first_last {
            list = list.child(Element::item().child(nav_button(
                "first",
                "First page",
                "«",
                (current > 1).then_some(1),
            )));
        }
        list = list.child(Element::item().child(nav_button(
            "prev",
            "Previous page",
            "‹",
            (current > 1).then(|| current - 1),
        )));

        for slot in page_window(current, total, max_visible) {
            let item = match slot {
                PageSlot::Ellipsis => Element::text("…")
                    .class("pagination__ellipsis")
                    .aria("hidden", "true"),
                PageSlot::Page(page) => {
                    let button_id = format!("{id}-page-{page}");
                    let is_current = page == current;
                    if !is_current && !self.disabled {
                        if let Some(callback) = &on_change {
                            register_page(&registry, &button_id, page, callback.clone());
                        }
                    }
                    let button = Element::button(page.to_string())
                        .id(&button_id)
                        .class("pagination__page")
                        .class_if(is_current, "pagination__page--current")
                        .aria("label", format!("Page {page}"))
                        .flag_if(self.disabled, "disabled");
                    if is_current {
                        button.aria("current", "page")
                    } else {
                        button
                    }
                }
            };
            list = list.child(Element::item().child(item));
        }

        list = list.child(Element::item().child(nav_button(
            "next",
            "Next page",
            "›",
            (current < total).then(|| current + 1),
        )));
        if self.show_first_last {
            list = list.child(Element::item().child(nav_button(
                "last",
                "Last page",
                "»",
                (current < total).then_some(total),
            )));
        }

        let summary = self.show_summary.then(|| {
            Element::text(format!("Page {current} of {total}"))
                .class("pagination__summary")
                .aria("live", "polite")
        });

        let jump = self.show_jump.then(|| {
            let input_id = format!("{id}-jump");
            if let Some(callback) = &on_change {
                let callback = callback.clone();
                let element_id = input_id.clone();
                registry.register(
                    &input_id,
                    "on_input",
                    handler(move |cx| {
                        let Some(text) = cx.event().text() else {
                            return;
                        };
                        match parse_jump(text, total) {
                            Some(page) if page != current => {
                                debug!("pagination jump to {page}");
                                call_handler(&callback, &element_id, EventData::Page(page));
                            }
                            Some(_) => {}
                            None => warn!("ignoring jump to {text:?}, pages are 1..={total}"),
                        }
                    }),
                );
            }
            Element::new("label")
                .class("pagination__jump")
                .child(Element::text("Go to page"))
                .child(
                    Element::input("number")
                        .id(&input_id)
                        .attr("min", "1")
                        .attr("max", total.to_string())
                        .aria("label", "Go to page")
                        .flag_if(self.disabled, "disabled"),
                )
        });

        nav.child(list).maybe_child(summary).maybe_child(jump)
    }
}

fn register_page(registry: &RegistryScope, element_id: &str, page: u32, callback: Handler) {
    let id = element_id.to_string();
    registry.register(
        element_id,
        "on_click",
        handler(move |_| call_handler(&callback, &id, EventData::Page(page))),
    );
}
