mod common;

use common::{handlers, Calls};
use trellis::types::{SortDirection, WidgetSize};
use trellis::widgets::course::{
    progress_percent, section_progress, CourseFilterBar, CourseFilterBarState, CourseLesson,
    CourseNavigation, CourseProgress, CourseSection, CourseSidebar, CourseSidebarState,
    FilterOption, LessonLink, SortOption,
};
use trellis::{EventData, HandlerRegistry, WidgetHandlers};
use webdom::{find_by_class, find_by_tag, find_element, Element};

fn sections() -> Vec<CourseSection> {
    vec![
        CourseSection::new("intro", "Introduction").lessons(vec![
            CourseLesson::new("welcome", "Welcome").duration(3).completed(),
            CourseLesson::new("setup", "Installing the toolchain").duration(12),
        ]),
        CourseSection::new("ownership", "Ownership").lessons(vec![
            CourseLesson::new("moves", "Moves and copies").completed(),
            CourseLesson::new("borrowing", "Borrowing"),
            CourseLesson::new("lifetimes", "Lifetimes").locked(),
        ]),
        CourseSection::new("later", "Coming soon"),
        CourseSection::new("untitled", "  "),
    ]
}

// =============================================================================
// Progress
// =============================================================================

#[test]
fn test_progress_percent() {
    assert_eq!(progress_percent(0, 0), 0);
    assert_eq!(progress_percent(1, 3), 33);
    assert_eq!(progress_percent(2, 3), 67);
    assert_eq!(progress_percent(12, 10), 100);
}

#[test]
fn test_progress_markup() {
    let root = CourseProgress::new().completed(3).total(8).build();

    assert_eq!(root.id.as_deref(), Some("course-progress"));
    assert!(!root.has_class("course-progress--complete"));
    let bar = find_by_class(&root, "course-progress__track")[0];
    assert_eq!(bar.get_attr("role"), Some("progressbar"));
    assert_eq!(bar.get_aria("valuenow"), Some("38"));
    assert_eq!(bar.get_aria("label"), Some("Course progress"));
    assert_eq!(
        find_by_class(&root, "course-progress__fill")[0].get_attr("style"),
        Some("width: 38%;")
    );
    assert_eq!(
        find_by_class(&root, "course-progress__count")[0].inner_text(),
        "3 of 8 lessons"
    );
}

#[test]
fn test_progress_complete_and_singular() {
    let root = CourseProgress::new()
        .completed(1)
        .total(1)
        .label("Rust 101")
        .size(WidgetSize::Sm)
        .build();
    assert!(root.has_class("course-progress--complete"));
    assert!(root.has_class("course-progress--sm"));
    assert_eq!(find_by_class(&root, "course-progress__percent")[0].inner_text(), "100%");
    assert_eq!(
        find_by_class(&root, "course-progress__count")[0].inner_text(),
        "1 of 1 lesson"
    );

    let hidden = CourseProgress::new().total(4).show_count(false).build();
    assert!(find_by_class(&hidden, "course-progress__count").is_empty());
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_navigation_links_and_position() {
    let registry = HandlerRegistry::new();
    let on_navigate = Calls::new();
    let root = CourseNavigation::new()
        .previous(LessonLink::new("moves", "Moves and copies", "/lessons/moves"))
        .next(LessonLink::new("lifetimes", "Lifetimes", "/lessons/lifetimes"))
        .position(5, 12)
        .build(&registry, &handlers(&[("on_navigate", &on_navigate)]));

    assert_eq!(root.get_aria("label"), Some("Lesson navigation"));
    let previous = find_element(&root, "course-nav-previous").unwrap();
    assert_eq!(previous.tag, "a");
    assert_eq!(previous.get_aria("label"), Some("Previous lesson: Moves and copies"));
    assert_eq!(
        find_by_class(&root, "course-nav__position")[0].inner_text(),
        "Lesson 5 of 12"
    );

    registry.dispatch("course-nav-next", "on_click", EventData::None);
    assert_eq!(
        on_navigate.events(),
        vec![EventData::Navigate {
            id: Some("lifetimes".into()),
            href: "/lessons/lifetimes".into()
        }]
    );
}

#[test]
fn test_navigation_missing_links_are_disabled() {
    let registry = HandlerRegistry::new();
    let on_navigate = Calls::new();
    let root = CourseNavigation::new()
        .next(LessonLink::new("draft", "Draft", " "))
        .build(&registry, &handlers(&[("on_navigate", &on_navigate)]));

    for id in ["course-nav-previous", "course-nav-next"] {
        let link = find_element(&root, id).unwrap();
        assert_eq!(link.tag, "span");
        assert_eq!(link.get_aria("disabled"), Some("true"));
        assert!(link.has_class("course-nav__link--disabled"));
    }
    assert!(registry.is_empty());
    assert!(find_by_class(&root, "course-nav__position").is_empty());
}

#[test]
fn test_navigation_clamps_position() {
    let registry = HandlerRegistry::new();
    let root = CourseNavigation::new()
        .position(0, 3)
        .build(&registry, &WidgetHandlers::new());
    assert_eq!(
        find_by_class(&root, "course-nav__position")[0].inner_text(),
        "Lesson 1 of 3"
    );
}

// =============================================================================
// Sidebar
// =============================================================================

fn sidebar(
    state: &CourseSidebarState,
    registry: &HandlerRegistry,
    handlers: &WidgetHandlers,
) -> Element {
    CourseSidebar::new()
        .title("Rust 101")
        .sections(sections())
        .active_lesson("borrowing")
        .state(state)
        .build(registry, handlers)
}

#[test]
fn test_section_progress() {
    let sections = sections();
    assert_eq!(section_progress(&sections[0]), (1, 2));
    assert_eq!(section_progress(&sections[1]), (1, 3));
    assert_eq!(section_progress(&sections[2]), (0, 0));
}

#[test]
fn test_sidebar_expands_section_of_active_lesson() {
    let registry = HandlerRegistry::new();
    let state = CourseSidebarState::new();
    let root = sidebar(&state, &registry, &WidgetHandlers::new());

    assert_eq!(state.expanded_ids(), vec!["ownership"]);
    assert_eq!(find_by_tag(&root, "section").len(), 3);

    let ownership = find_element(&root, "course-sidebar-section-ownership").unwrap();
    assert_eq!(ownership.get_aria("expanded"), Some("true"));
    assert_eq!(ownership.get_aria("controls"), Some("course-sidebar-section-ownership-lessons"));
    assert!(!find_element(&root, "course-sidebar-section-ownership-lessons")
        .unwrap()
        .has_flag("hidden"));
    assert!(find_element(&root, "course-sidebar-section-intro-lessons")
        .unwrap()
        .has_flag("hidden"));

    let active = find_element(&root, "course-sidebar-lesson-borrowing").unwrap();
    assert_eq!(active.get_aria("current"), Some("page"));
    assert_eq!(
        find_by_class(ownership, "course-sidebar__section-progress")[0].inner_text(),
        "1/3"
    );
}

#[test]
fn test_sidebar_lesson_states() {
    let registry = HandlerRegistry::new();
    let state = CourseSidebarState::new();
    let on_lesson_select = Calls::new();
    let root = sidebar(
        &state,
        &registry,
        &handlers(&[("on_lesson_select", &on_lesson_select)]),
    );

    let locked = find_element(&root, "course-sidebar-lesson-lifetimes").unwrap();
    assert!(locked.has_flag("disabled"));
    assert_eq!(locked.get_data("status").map(String::as_str), Some("locked"));
    assert!(!registry.contains("course-sidebar-lesson-lifetimes", "on_click"));

    let done = find_element(&root, "course-sidebar-lesson-welcome").unwrap();
    assert_eq!(done.get_data("status").map(String::as_str), Some("completed"));

    registry.dispatch("course-sidebar-lesson-setup", "on_click", EventData::None);
    assert_eq!(
        on_lesson_select.events(),
        vec![EventData::Select {
            id: "setup".into(),
            label: "Installing the toolchain".into()
        }]
    );

    let durations: Vec<String> = find_by_class(&root, "course-sidebar__duration")
        .iter()
        .map(|e| e.inner_text())
        .collect();
    assert_eq!(durations, vec!["3 min", "12 min"]);
}

#[test]
fn test_sidebar_empty_section() {
    let registry = HandlerRegistry::new();
    let state = CourseSidebarState::new();
    let root = sidebar(&state, &registry, &WidgetHandlers::new());
    let lessons = find_element(&root, "course-sidebar-section-later-lessons").unwrap();
    assert_eq!(lessons.inner_text(), "No lessons yet");
}

#[test]
fn test_sidebar_section_toggle() {
    let registry = HandlerRegistry::new();
    let state = CourseSidebarState::new();
    let on_section_toggle = Calls::new();
    let handlers = handlers(&[("on_section_toggle", &on_section_toggle)]);
    sidebar(&state, &registry, &handlers);

    registry.dispatch("course-sidebar-section-intro", "on_click", EventData::None);
    registry.dispatch("course-sidebar-section-ownership", "on_click", EventData::None);

    assert_eq!(state.expanded_ids(), vec!["intro"]);
    assert_eq!(
        on_section_toggle.events(),
        vec![
            EventData::Toggle {
                id: "intro".into(),
                expanded: true
            },
            EventData::Toggle {
                id: "ownership".into(),
                expanded: false
            },
        ]
    );

    // The active lesson only seeds the first build.
    let root = sidebar(&state, &registry, &handlers);
    assert_eq!(
        find_element(&root, "course-sidebar-section-ownership")
            .unwrap()
            .get_aria("expanded"),
        Some("false")
    );
}

#[test]
fn test_sidebar_collapse_uncontrolled() {
    let registry = HandlerRegistry::new();
    let state = CourseSidebarState::new();
    let on_collapse_change = Calls::new();
    let handlers = handlers(&[("on_collapse_change", &on_collapse_change)]);

    let root = sidebar(&state, &registry, &handlers);
    let toggle = find_element(&root, "course-sidebar-collapse").unwrap();
    assert_eq!(toggle.get_aria("expanded"), Some("true"));
    assert_eq!(toggle.get_aria("controls"), Some("course-sidebar-sections"));

    registry.dispatch("course-sidebar-collapse", "on_click", EventData::None);
    let root = sidebar(&state, &registry, &handlers);
    assert!(root.has_class("course-sidebar--collapsed"));
    assert!(find_element(&root, "course-sidebar-sections").unwrap().has_flag("hidden"));
    assert_eq!(
        on_collapse_change.events(),
        vec![EventData::Toggle {
            id: "course-sidebar".into(),
            expanded: false
        }]
    );
}

#[test]
fn test_sidebar_collapse_controlled() {
    let registry = HandlerRegistry::new();
    let state = CourseSidebarState::new();
    let on_collapse_change = Calls::new();
    let handlers = handlers(&[("on_collapse_change", &on_collapse_change)]);
    let build = || {
        CourseSidebar::new()
            .sections(sections())
            .collapsed(false)
            .state(&state)
            .build(&registry, &handlers)
    };

    build();
    registry.dispatch("course-sidebar-collapse", "on_click", EventData::None);
    let root = build();

    assert!(!root.has_class("course-sidebar--collapsed"));
    assert_eq!(on_collapse_change.len(), 1);
}

#[test]
fn test_sidebar_truncates_long_titles() {
    let registry = HandlerRegistry::new();
    let state = CourseSidebarState::new();
    let root = CourseSidebar::new()
        .title("Rust 101")
        .sections(sections())
        .max_title_width(8)
        .state(&state)
        .build(&registry, &WidgetHandlers::new());

    let setup = find_element(&root, "course-sidebar-lesson-setup").unwrap();
    assert_eq!(setup.inner_text(), "Install…");
    assert_eq!(find_by_class(&root, "course-sidebar__title")[0].inner_text(), "Rust 101");
}

// =============================================================================
// Filter bar
// =============================================================================

fn categories() -> Vec<FilterOption> {
    vec![
        FilterOption::new("web", "Web").count(12),
        FilterOption::new("systems", "Systems").count(4),
        FilterOption::new("blank", ""),
    ]
}

fn levels() -> Vec<FilterOption> {
    vec![
        FilterOption::new("beginner", "Beginner"),
        FilterOption::new("advanced", "Advanced"),
    ]
}

fn sort_options() -> Vec<SortOption> {
    vec![
        SortOption::new("popular", "Most popular"),
        SortOption::new("newest", "Newest").direction(SortDirection::Descending),
    ]
}

fn filter_bar(
    state: &CourseFilterBarState,
    registry: &HandlerRegistry,
    handlers: &WidgetHandlers,
) -> Element {
    CourseFilterBar::new()
        .categories(categories())
        .levels(levels())
        .sort_options(sort_options())
        .result_count(16)
        .state(state)
        .build(registry, handlers)
}

#[test]
fn test_filter_bar_markup() {
    let registry = HandlerRegistry::new();
    let state = CourseFilterBarState::new();
    let root = filter_bar(&state, &registry, &WidgetHandlers::new());

    assert_eq!(root.get_attr("role"), Some("search"));
    let groups = find_by_class(&root, "course-filters__group");
    assert_eq!(groups.len(), 2);
    assert!(groups[0].has_class("course-filters__group--category"));
    assert_eq!(groups[0].get_attr("role"), Some("group"));
    assert_eq!(find_by_class(&root, "course-filters__chip").len(), 4);

    let web = find_element(&root, "course-filters-chip-web").unwrap();
    assert_eq!(web.get_aria("pressed"), Some("false"));
    assert_eq!(web.inner_text(), "Web12");

    assert_eq!(find_by_tag(&root, "option").len(), 2);
    assert_eq!(
        find_by_class(&root, "course-filters__results")[0].inner_text(),
        "16 results"
    );
    assert!(find_element(&root, "course-filters-clear").is_none());
}

#[test]
fn test_chip_toggles_selection() {
    let registry = HandlerRegistry::new();
    let state = CourseFilterBarState::new();
    let on_filter_change = Calls::new();
    let handlers = handlers(&[("on_filter_change", &on_filter_change)]);
    filter_bar(&state, &registry, &handlers);

    registry.dispatch("course-filters-chip-web", "on_click", EventData::None);
    registry.dispatch("course-filters-chip-beginner", "on_click", EventData::None);
    let root = filter_bar(&state, &registry, &handlers);

    let web = find_element(&root, "course-filters-chip-web").unwrap();
    assert_eq!(web.get_aria("pressed"), Some("true"));
    assert!(web.has_class("course-filters__chip--active"));
    assert_eq!(
        on_filter_change.last(),
        Some(EventData::Filters(vec!["beginner".into(), "web".into()]))
    );

    registry.dispatch("course-filters-chip-web", "on_click", EventData::None);
    assert_eq!(
        on_filter_change.last(),
        Some(EventData::Filters(vec!["beginner".into()]))
    );
}

#[test]
fn test_clear_all_resets_selection() {
    let registry = HandlerRegistry::new();
    let state = CourseFilterBarState::new();
    let on_filter_change = Calls::new();
    let handlers = handlers(&[("on_filter_change", &on_filter_change)]);
    filter_bar(&state, &registry, &handlers);

    registry.dispatch("course-filters-chip-systems", "on_click", EventData::None);
    let root = filter_bar(&state, &registry, &handlers);
    assert_eq!(
        find_element(&root, "course-filters-clear").unwrap().inner_text(),
        "Clear all"
    );

    registry.dispatch("course-filters-clear", "on_click", EventData::None);
    let root = filter_bar(&state, &registry, &handlers);
    assert_eq!(on_filter_change.last(), Some(EventData::Filters(vec![])));
    assert!(find_element(&root, "course-filters-clear").is_none());
    assert_eq!(
        find_element(&root, "course-filters-chip-systems")
            .unwrap()
            .get_aria("pressed"),
        Some("false")
    );
}

#[test]
fn test_controlled_selection() {
    let registry = HandlerRegistry::new();
    let state = CourseFilterBarState::new();
    let on_filter_change = Calls::new();
    let handlers = handlers(&[("on_filter_change", &on_filter_change)]);
    let build = || {
        CourseFilterBar::new()
            .categories(categories())
            .selected(["systems"])
            .state(&state)
            .build(&registry, &handlers)
    };

    build();
    registry.dispatch("course-filters-chip-web", "on_click", EventData::None);
    let root = build();

    assert_eq!(
        on_filter_change.events(),
        vec![EventData::Filters(vec!["systems".into(), "web".into()])]
    );
    assert_eq!(
        find_element(&root, "course-filters-chip-web")
            .unwrap()
            .get_aria("pressed"),
        Some("false")
    );
    assert_eq!(
        find_element(&root, "course-filters-chip-systems")
            .unwrap()
            .get_aria("pressed"),
        Some("true")
    );
}

#[test]
fn test_sort_change() {
    let registry = HandlerRegistry::new();
    let state = CourseFilterBarState::new();
    let on_sort_change = Calls::new();
    let handlers = handlers(&[("on_sort_change", &on_sort_change)]);
    filter_bar(&state, &registry, &handlers);

    let choose = |value: &str| {
        registry.dispatch(
            "course-filters-sort",
            "on_input",
            EventData::Change { text: value.into() },
        )
    };
    choose("newest");
    choose("cheapest");

    assert_eq!(
        on_sort_change.events(),
        vec![EventData::Sort {
            column: "newest".into(),
            direction: Some(SortDirection::Descending)
        }]
    );

    let root = filter_bar(&state, &registry, &handlers);
    let selected: Vec<&Element> = find_by_tag(&root, "option")
        .into_iter()
        .filter(|o| o.has_flag("selected"))
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].get_attr("value"), Some("newest"));
}

#[test]
fn test_single_result_is_singular() {
    let registry = HandlerRegistry::new();
    let state = CourseFilterBarState::new();
    let root = CourseFilterBar::new()
        .result_count(1)
        .state(&state)
        .build(&registry, &WidgetHandlers::new());
    assert_eq!(
        find_by_class(&root, "course-filters__results")[0].inner_text(),
        "1 result"
    );
    assert!(find_by_class(&root, "course-filters__group").is_empty());
}
