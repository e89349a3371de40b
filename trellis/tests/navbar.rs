mod common;

use common::{handlers, Calls};
use trellis::types::Variant;
use trellis::widgets::navbar::{NavBrand, NavItem, Navbar, NavbarState};
use trellis::{EventData, HandlerRegistry, WidgetHandlers};
use webdom::{find_by_class, find_element, Element};

fn items() -> Vec<NavItem> {
    vec![
        NavItem::new("courses", "Courses").href("/courses"),
        NavItem::new("pricing", "Pricing").href("/pricing").badge("New"),
        NavItem::new("more", "More").children(vec![
            NavItem::new("blog", "Blog").href("/blog"),
            NavItem::new("jobs", "Jobs").href("/jobs").disabled(),
        ]),
        NavItem::new("ghost", " "),
    ]
}

fn build(state: &NavbarState, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
    Navbar::new()
        .brand(NavBrand::new("Academy").href("/").logo("/logo.svg"))
        .items(items())
        .active("courses")
        .state(state)
        .build(registry, handlers)
}

#[test]
fn test_structure_and_active_item() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let root = build(&state, &registry, &WidgetHandlers::new());

    assert_eq!(root.tag, "nav");
    assert!(root.has_class("navbar--default"));
    assert_eq!(find_by_class(&root, "navbar__item").len(), 3);

    let brand = find_element(&root, "navbar-brand").unwrap();
    assert_eq!(brand.get_attr("href"), Some("/"));
    assert_eq!(brand.inner_text(), "Academy");
    assert_eq!(find_by_class(&root, "navbar__logo")[0].get_attr("src"), Some("/logo.svg"));

    let courses = find_element(&root, "navbar-item-courses").unwrap();
    assert_eq!(courses.get_aria("current"), Some("page"));
    assert!(courses.has_class("navbar__link--active"));

    let pricing = find_element(&root, "navbar-item-pricing").unwrap();
    assert_eq!(pricing.get_aria("current"), None);
    assert_eq!(find_by_class(pricing, "navbar__badge")[0].inner_text(), "New");
}

#[test]
fn test_link_click_navigates() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let on_navigate = Calls::new();
    build(&state, &registry, &handlers(&[("on_navigate", &on_navigate)]));

    registry.dispatch("navbar-item-pricing", "on_click", EventData::None);
    registry.dispatch("navbar-brand", "on_click", EventData::None);
    assert_eq!(
        on_navigate.events(),
        vec![
            EventData::Navigate {
                id: Some("pricing".into()),
                href: "/pricing".into()
            },
            EventData::Navigate {
                id: Some("brand".into()),
                href: "/".into()
            },
        ]
    );
}

#[test]
fn test_dropdown_toggles_and_reports() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let on_toggle = Calls::new();
    let handlers = handlers(&[("on_toggle", &on_toggle)]);

    let root = build(&state, &registry, &handlers);
    let button = find_element(&root, "navbar-dropdown-more").unwrap();
    assert_eq!(button.get_aria("expanded"), Some("false"));
    assert_eq!(button.get_aria("haspopup"), Some("true"));
    assert!(find_element(&root, "navbar-dropdown-more-menu").unwrap().has_flag("hidden"));

    registry.dispatch("navbar-dropdown-more", "on_click", EventData::None);
    let root = build(&state, &registry, &handlers);
    assert_eq!(
        find_element(&root, "navbar-dropdown-more").unwrap().get_aria("expanded"),
        Some("true")
    );
    assert!(!find_element(&root, "navbar-dropdown-more-menu").unwrap().has_flag("hidden"));

    registry.dispatch("navbar-dropdown-more", "on_click", EventData::None);
    assert_eq!(
        on_toggle.events(),
        vec![
            EventData::Toggle {
                id: "more".into(),
                expanded: true
            },
            EventData::Toggle {
                id: "more".into(),
                expanded: false
            },
        ]
    );
}

#[test]
fn test_disabled_item_has_no_handler() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let on_navigate = Calls::new();
    let root = build(&state, &registry, &handlers(&[("on_navigate", &on_navigate)]));

    let jobs = find_element(&root, "navbar-item-jobs").unwrap();
    assert_eq!(jobs.tag, "span");
    assert_eq!(jobs.get_aria("disabled"), Some("true"));
    assert!(jobs.has_class("navbar__dropdown-link--disabled"));
    assert!(!registry.contains("navbar-item-jobs", "on_click"));
    assert!(registry.contains("navbar-item-blog", "on_click"));
}

#[test]
fn test_item_disabled_on_rebuild_stops_navigating() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let on_navigate = Calls::new();
    let handlers = handlers(&[("on_navigate", &on_navigate)]);
    let build_with = |pricing: NavItem| {
        Navbar::new()
            .items(vec![NavItem::new("courses", "Courses").href("/courses"), pricing])
            .state(&state)
            .build(&registry, &handlers)
    };

    build_with(NavItem::new("pricing", "Pricing").href("/pricing"));
    assert!(registry.contains("navbar-item-pricing", "on_click"));

    build_with(NavItem::new("pricing", "Pricing").href("/pricing").disabled());
    assert!(!registry.dispatch("navbar-item-pricing", "on_click", EventData::None));
    assert!(registry.contains("navbar-item-courses", "on_click"));
    assert!(on_navigate.is_empty());
}

#[test]
fn test_mobile_menu_toggle_uncontrolled() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let on_menu_toggle = Calls::new();
    let handlers = handlers(&[("on_menu_toggle", &on_menu_toggle)]);

    let root = build(&state, &registry, &handlers);
    let toggle = find_element(&root, "navbar-menu-toggle").unwrap();
    assert_eq!(toggle.get_aria("expanded"), Some("false"));
    assert_eq!(toggle.get_aria("controls"), Some("navbar-menu"));

    registry.dispatch("navbar-menu-toggle", "on_click", EventData::None);
    let root = build(&state, &registry, &handlers);
    assert!(find_element(&root, "navbar-menu").unwrap().has_class("navbar__menu--open"));
    assert_eq!(on_menu_toggle.events(), vec![EventData::Visibility(true)]);
}

#[test]
fn test_mobile_menu_controlled() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let on_menu_toggle = Calls::new();
    let handlers = handlers(&[("on_menu_toggle", &on_menu_toggle)]);
    let build_closed = || {
        Navbar::new()
            .items(items())
            .mobile_open(false)
            .state(&state)
            .build(&registry, &handlers)
    };

    build_closed();
    registry.dispatch("navbar-menu-toggle", "on_click", EventData::None);
    let root = build_closed();

    assert_eq!(on_menu_toggle.events(), vec![EventData::Visibility(true)]);
    assert!(!find_element(&root, "navbar-menu").unwrap().has_class("navbar__menu--open"));
}

#[test]
fn test_actions_variant_and_sticky() {
    let registry = HandlerRegistry::new();
    let state = NavbarState::new();
    let root = Navbar::new()
        .id("top")
        .actions(vec![NavItem::new("login", "Sign in").href("/login")])
        .variant(Variant::Primary)
        .sticky(true)
        .state(&state)
        .build(&registry, &WidgetHandlers::new());

    assert!(root.has_class("navbar--primary"));
    assert!(root.has_class("navbar--sticky"));
    let action = find_element(&root, "top-item-login").unwrap();
    assert!(action.has_class("navbar__action"));
    assert!(find_by_class(&root, "navbar__brand").is_empty());
}
