//! Navbar widget - brand, links, dropdowns and a mobile menu toggle.

use serde::{Deserialize, Serialize};
use webdom::Element;

use crate::controlled::Controlled;
use crate::handler_context::{call_handler, emit, handler, EventData, Handler};
use crate::state::State;
use crate::toggle_set::ToggleSet;
use crate::types::{modifier, Variant};
use crate::{HandlerRegistry, RegistryScope, WidgetHandlers};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub href: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub disabled: bool,
    /// Dropdown entries. An item with children renders as a menu button.
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
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

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavBrand {
    pub label: String,
    pub href: Option<String>,
    pub logo_src: Option<String>,
}

impl NavBrand {
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

    pub fn logo(mut self, src: impl Into<String>) -> Self {
        self.logo_src = Some(src.into());
        self
    }
}

/// Local state of a navbar: open dropdowns and the mobile menu.
#[derive(Debug, Clone, Default)]
pub struct NavbarState {
    pub open_dropdowns: State<ToggleSet>,
    pub mobile_open: Controlled<bool>,
}

impl NavbarState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Typestate marker: navbar needs a state reference.
pub struct NeedsState;

/// Typestate marker: navbar has a state reference.
pub struct HasState<'a>(&'a NavbarState);

/// A navbar widget builder.
///
/// # Example
///
/// ```ignore
/// Navbar::new()
///     .brand(NavBrand::new("Academy").href("/"))
///     .items(vec![
///         NavItem::new("courses", "Courses").href("/courses"),
///         NavItem::new("more", "More").children(vec![
///             NavItem::new("blog", "Blog").href("/blog"),
///         ]),
///     ])
///     .active("courses")
///     .state(&navbar_state)
///     .build(&registry, &handlers)
/// ```
pub struct Navbar<S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    brand: Option<NavBrand>,
    items: Vec<NavItem>,
    actions: Vec<NavItem>,
    active_id: Option<String>,
    mobile_open: Option<bool>,
    sticky: bool,
    variant: Variant,
}

impl Default for Navbar<NeedsState> {
    fn default() -> Self {
        Self::new()
    }
}

impl Navbar<NeedsState> {
    pub fn new() -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            brand: None,
            items: Vec::new(),
            actions: Vec::new(),
            active_id: None,
            mobile_open: None,
            sticky: false,
            variant: Variant::Default,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state(self, state: &NavbarState) -> Navbar<HasState<'_>> {
        Navbar {
            state_marker: HasState(state),
            id: self.id,
            brand: self.brand,
            items: self.items,
            actions: self.actions,
            active_id: self.active_id,
            mobile_open: self.mobile_open,
            sticky: self.sticky,
            variant: self.variant,
        }
    }
}

impl<S> Navbar<S> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn brand(mut self, brand: NavBrand) -> Self {
        self.brand = Some(brand);
        self
    }

    pub fn items(mut self, items: Vec<NavItem>) -> Self {
        self.items = items;
        self
    }

    /// Buttons on the far side of the bar (sign in, cart, ...).
    pub fn actions(mut self, actions: Vec<NavItem>) -> Self {
        self.actions = actions;
        self
    }

    /// Id of the item for the current page.
    pub fn active(mut self, id: impl Into<String>) -> Self {
        self.active_id = Some(id.into());
        self
    }

    /// Control the mobile menu from outside.
    pub fn mobile_open(mut self, open: bool) -> Self {
        self.mobile_open = Some(open);
        self
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

fn navigate_handler(callback: Handler, element_id: &str, item_id: &str, href: &str) -> Handler {
    let element_id = element_id.to_string();
    let item_id = item_id.to_string();
    let href = href.to_string();
    handler(move |_| {
        call_handler(
            &callback,
            &element_id,
            EventData::Navigate {
                id: Some(item_id.clone()),
                href: href.clone(),
            },
        );
    })
}

struct ItemContext<'a> {
    registry: &'a RegistryScope,
    handlers: &'a WidgetHandlers,
    navbar_id: &'a str,
    active_id: Option<&'a str>,
}

impl ItemContext<'_> {
    /// A plain link (or disabled span) for a leaf item.
    fn link(&self, item: &NavItem, class: &str) -> Element {
        let element_id = format!("{}-item-{}", self.navbar_id, item.id);
        let is_active = self.active_id == Some(item.id.as_str());

        let mut link = match (&item.href, item.disabled) {
            (Some(href), false) => {
                if let Some(callback) = self.handlers.get("on_navigate") {
                    self.registry.register(
                        &element_id,
                        "on_click",
                        navigate_handler(callback.clone(), &element_id, &item.id, href),
                    );
                }
                Element::link(href)
            }
            (_, true) => Element::span().aria("disabled", "true"),
            (None, false) => Element::span(),
        }
        .id(&element_id)
        .class(class)
        .class_if(is_active, format!("{class}--active"))
        .class_if(item.disabled, format!("{class}--disabled"));

        if is_active {
            link = link.aria("current", "page");
        }

        link.maybe_child(item.icon.as_ref().map(|icon| {
            Element::span()
                .class("navbar__icon")
                .data("icon", icon)
                .aria("hidden", "true")
        }))
        .child(Element::text(&item.label))
        .maybe_child(
            item.badge
                .as_ref()
                .map(|badge| Element::text(badge).class("navbar__badge")),
        )
    }
}

impl<'a> Navbar<HasState<'a>> {
    /// Build the navbar element.
    ///
    /// Handlers: `on_navigate` (`EventData::Navigate`), `on_toggle` for
    /// dropdowns (`EventData::Toggle`), `on_menu_toggle` for the mobile menu
    /// (`EventData::Visibility`).
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let state = self.state_marker.0;
        let id = self.id.unwrap_or_else(|| "navbar".into());
        let registry = registry.scope(&id);
        let menu_id = format!("{id}-menu");
        let toggle_id = format!("{id}-menu-toggle");
        let open_dropdowns = state.open_dropdowns.get();
        let mobile_open = state.mobile_open.resolve(self.mobile_open.as_ref());

        let cx = ItemContext {
            registry: &registry,
            handlers,
            navbar_id: &id,
            active_id: self.active_id.as_deref(),
        };

        // Brand
        let brand = self.brand.filter(|b| !webdom::text::is_blank(&b.label)).map(|brand| {
            let logo = brand.logo_src.as_ref().map(|src| {
                Element::new("img")
                    .class("navbar__logo")
                    .attr("src", src)
                    .attr("alt", "")
            });
            let element = match &brand.href {
                Some(href) => {
                    let brand_id = format!("{id}-brand");
                    if let Some(callback) = handlers.get("on_navigate") {
                        registry.register(
                            &brand_id,
                            "on_click",
                            navigate_handler(callback.clone(), &brand_id, "brand", href),
                        );
                    }
                    Element::link(href).id(brand_id)
                }
                None => Element::span(),
            };
            element
                .class("navbar__brand")
                .maybe_child(logo)
                .child(Element::text(&brand.label))
        });

        // Mobile menu toggle
        {
            let local = state.mobile_open.clone();
            let external = self.mobile_open;
            let callback = handlers.get("on_menu_toggle").cloned();
            let element_id = toggle_id.clone();
            registry.register(
                &toggle_id,
                "on_click",
                handler(move |_| {
                    let next = !local.resolve(external.as_ref());
                    local.request(external.as_ref(), next);
                    if let Some(callback) = &callback {
                        call_handler(callback, &element_id, EventData::Visibility(next));
                    }
                }),
            );
        }
        let toggle = Element::button("☰")
            .id(&toggle_id)
            .class("navbar__toggle")
            .aria("label", "Toggle navigation")
            .aria("expanded", mobile_open.to_string())
            .aria("controls", &menu_id);

        // Items
        let mut menu = Element::list()
            .id(&menu_id)
            .class("navbar__menu")
            .class_if(mobile_open, "navbar__menu--open");

        for item in self.items.iter().filter(|i| !webdom::text::is_blank(&i.label)) {
            let entry = if item.children.is_empty() {
                cx.link(item, "navbar__link")
            } else {
                let button_id = format!("{id}-dropdown-{}", item.id);
                let panel_id = format!("{button_id}-menu");
                let expanded = open_dropdowns.contains(&item.id);

                if !item.disabled {
                    let dropdowns = state.open_dropdowns.clone();
                    let item_id = item.id.clone();
                    let handlers = handlers.clone();
                    let element_id = button_id.clone();
                    registry.register(
                        &button_id,
                        "on_click",
                        handler(move |_| {
                            let expanded = dropdowns.modify(|set| set.toggle(&item_id));
                            emit(
                                &handlers,
                                "on_toggle",
                                &element_id,
                                EventData::Toggle {
                                    id: item_id.clone(),
                                    expanded,
                                },
                            );
                        }),
                    );
                }

                let button = Element::button(item.label.clone())
                    .id(&button_id)
                    .class("navbar__dropdown-toggle")
                    .aria("haspopup", "true")
                    .aria("expanded", expanded.to_string())
                    .aria("controls", &panel_id)
                    .flag_if(item.disabled, "disabled");
                let button = if item.disabled {
                    button.aria("disabled", "true")
                } else {
                    button
                };

                let panel = Element::list()
                    .id(&panel_id)
                    .class("navbar__dropdown")
                    .flag_if(!expanded, "hidden")
                    .children(
                        item.children
                            .iter()
                            .filter(|c| !webdom::text::is_blank(&c.label))
                            .map(|child| {
                                Element::item()
                                    .class("navbar__dropdown-item")
                                    .child(cx.link(child, "navbar__dropdown-link"))
                            }),
                    );

                Element::div()
                    .class("navbar__dropdown-wrapper")
                    .child(button)
                    .child(panel)
            };
            menu = menu.child(Element::item().class("navbar__item").child(entry));
        }

        let actions = (!self.actions.is_empty()).then(|| {
            Element::div().class("navbar__actions").children(
                self.actions
                    .iter()
                    .filter(|a| !webdom::text::is_blank(&a.label))
                    .map(|action| cx.link(action, "navbar__action")),
            )
        });

        Element::new("nav")
            .id(&id)
            .class("navbar")
            .class(modifier("navbar", self.variant.as_str()))
            .class_if(self.sticky, "navbar--sticky")
            .aria("label", "Main")
            .maybe_child(brand)
            .child(toggle)
            .child(menu)
            .maybe_child(actions)
    }
}
