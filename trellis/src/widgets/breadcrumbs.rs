//! Breadcrumbs widget - trail of links ending at the current page.

use serde::{Deserialize, Serialize};
use webdom::Element;

use crate::config::BreadcrumbConfig;
use crate::handler_context::{call_handler, handler, EventData};
use crate::render::{render_or_default, Renderer};
use crate::{HandlerRegistry, WidgetHandlers};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbItem {
    pub label: String,
    pub href: Option<String>,
    pub icon: Option<String>,
}

impl BreadcrumbItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// One slot of the collapsed trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crumb<'a> {
    Item(&'a BreadcrumbItem),
    Ellipsis,
}

/// Apply the collapsing rule.
///
/// Items with blank labels are dropped first. When more than `max_items`
/// remain, only the first and the last are kept, with an ellipsis between
/// them when `show_ellipsis` is set.
pub fn collapse_items(
    items: &[BreadcrumbItem],
    max_items: usize,
    show_ellipsis: bool,
) -> Vec<Crumb<'_>> {
    let valid: Vec<&BreadcrumbItem> = items
        .iter()
        .filter(|item| !webdom::text::is_blank(&item.label))
        .collect();

    if valid.len() <= max_items || valid.len() < 2 {
        return valid.into_iter().map(Crumb::Item).collect();
    }

    let mut out = vec![Crumb::Item(valid[0])];
    if show_ellipsis {
        out.push(Crumb::Ellipsis);
    }
    out.push(Crumb::Item(valid[valid.len() - 1]));
    out
}

/// A breadcrumbs widget builder.
///
/// Stateless. The last item is always rendered as the current page, never as
/// a link.
///
/// # Example
///
/// ```ignore
/// Breadcrumbs::new()
///     .items(vec![
///         BreadcrumbItem::new("Home").href("/"),
///         BreadcrumbItem::new("Courses").href("/courses"),
///         BreadcrumbItem::new("Rust 101"),
///     ])
///     .build(&registry, &handlers)
/// ```
#[derive(Clone, Default)]
pub struct Breadcrumbs {
    id: Option<String>,
    items: Vec<BreadcrumbItem>,
    max_items: Option<usize>,
    show_ellipsis: Option<bool>,
    separator: Option<String>,
    separator_renderer: Option<Renderer<usize>>,
}

impl Breadcrumbs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: &BreadcrumbConfig) -> Self {
        self.max_items = Some(config.max_items);
        self.separator = Some(config.separator.clone());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn items(mut self, items: Vec<BreadcrumbItem>) -> Self {
        self.items = items;
        self
    }

    pub fn item(mut self, item: BreadcrumbItem) -> Self {
        self.items.push(item);
        self
    }

    /// Collapse the trail when it has more than `max` items.
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Whether a collapsed trail shows the ellipsis marker (default true).
    pub fn show_ellipsis(mut self, show: bool) -> Self {
        self.show_ellipsis = Some(show);
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Custom separator markup, given the separator's position. Falls back
    /// to the text separator when it fails.
    pub fn separator_renderer(mut self, renderer: Renderer<usize>) -> Self {
        self.separator_renderer = Some(renderer);
        self
    }

    /// Build the breadcrumbs element.
    ///
    /// Registers `on_click` for every link when `on_navigate` is supplied.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let defaults = BreadcrumbConfig::default();
        let id = self.id.unwrap_or_else(|| "breadcrumbs".into());
        let registry = registry.scope(&id);
        let max_items = self.max_items.unwrap_or(defaults.max_items);
        let separator = self.separator.unwrap_or(defaults.separator);
        let crumbs = collapse_items(&self.items, max_items, self.show_ellipsis.unwrap_or(true));

        let nav = Element::new("nav")
            .id(&id)
            .class("breadcrumbs-nav")
            .aria("label", "Breadcrumb");
        if crumbs.is_empty() {
            return nav;
        }

        let last = crumbs.len() - 1;
        let mut list = Element::ordered_list().class("breadcrumbs");

        for (index, crumb) in crumbs.iter().enumerate() {
            if index > 0 {
                let position = index - 1;
                let content = render_or_default(
                    self.separator_renderer.as_ref(),
                    &position,
                    "separator",
                    || Element::text(separator.clone()),
                );
                list = list.child(
                    Element::item()
                        .class("breadcrumbs__separator")
                        .aria("hidden", "true")
                        .child(content),
                );
            }

            let entry = match crumb {
                Crumb::Ellipsis => Element::text("…")
                    .class("breadcrumbs__ellipsis")
                    .aria("label", "Show hidden breadcrumbs"),
                Crumb::Item(item) if index == last => Element::span()
                    .class("breadcrumbs__current")
                    .aria("current", "page")
                    .maybe_child(icon(item))
                    .child(Element::text(&item.label)),
                Crumb::Item(item) => match &item.href {
                    Some(href) => {
                        let link_id = format!("{id}-link-{index}");
                        if let Some(on_navigate) = handlers.get("on_navigate").cloned() {
                            let href = href.clone();
                            let link = link_id.clone();
                            registry.register(
                                &link_id,
                                "on_click",
                                handler(move |_| {
                                    call_handler(
                                        &on_navigate,
                                        &link,
                                        EventData::Navigate {
                                            id: None,
                                            href: href.clone(),
                                        },
                                    );
                                }),
                            );
                        }
                        Element::link(href)
                            .id(link_id)
                            .class("breadcrumbs__link")
                            .maybe_child(icon(item))
                            .child(Element::text(&item.label))
                    }
                    None => Element::span()
                        .class("breadcrumbs__text")
                        .maybe_child(icon(item))
                        .child(Element::text(&item.label)),
                },
            };

            list = list.child(Element::item().class("breadcrumbs__item").child(entry));
        }

        nav.child(list)
    }
}

fn icon(item: &BreadcrumbItem) -> Option<Element> {
    item.icon.as_ref().map(|name| {
        Element::span()
            .class("breadcrumbs__icon")
            .data("icon", name)
            .aria("hidden", "true")
    })
}
