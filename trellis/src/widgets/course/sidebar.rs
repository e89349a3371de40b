use log::debug;
use webdom::Element;

use super::{CourseLesson, CourseSection};
use crate::controlled::Controlled;
use crate::handler_context::{call_handler, emit, handler, EventData};
use crate::state::State;
use crate::toggle_set::ToggleSet;
use crate::{HandlerRegistry, RegistryScope, WidgetHandlers};

const DEFAULT_TITLE_WIDTH: usize = 40;

/// Completed and total lesson counts of a section.
pub fn section_progress(section: &CourseSection) -> (usize, usize) {
    let done = section.lessons.iter().filter(|l| l.completed).count();
    (done, section.lessons.len())
}

/// Local state of a course sidebar.
///
/// `expanded` stays `None` until the first build, which seeds it with the
/// section holding the active lesson. After that only toggles change it.
#[derive(Debug, Clone, Default)]
pub struct CourseSidebarState {
    pub expanded: State<Option<ToggleSet>>,
    pub collapsed: Controlled<bool>,
}

impl CourseSidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expanded section ids, empty before the first build.
    pub fn expanded_ids(&self) -> Vec<String> {
        self.expanded
            .with(|set| set.as_ref().map(ToggleSet::to_vec).unwrap_or_default())
    }
}

/// Typestate marker: sidebar needs a state reference.
pub struct NeedsState;

/// Typestate marker: sidebar has a state reference.
pub struct HasState<'a>(&'a CourseSidebarState);

/// A course outline sidebar builder.
///
/// # Example
///
/// ```ignore
/// CourseSidebar::new()
///     .title("Rust 101")
///     .sections(course.sections.clone())
///     .active_lesson("ownership")
///     .state(&sidebar_state)
///     .build(&registry, &handlers)
/// ```
pub struct CourseSidebar<S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    title: Option<String>,
    sections: Vec<CourseSection>,
    active_lesson: Option<String>,
    collapsed: Option<bool>,
    max_title_width: usize,
}

impl Default for CourseSidebar<NeedsState> {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseSidebar<NeedsState> {
    pub fn new() -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            title: None,
            sections: Vec::new(),
            active_lesson: None,
            collapsed: None,
            max_title_width: DEFAULT_TITLE_WIDTH,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state(self, state: &CourseSidebarState) -> CourseSidebar<HasState<'_>> {
        CourseSidebar {
            state_marker: HasState(state),
            id: self.id,
            title: self.title,
            sections: self.sections,
            active_lesson: self.active_lesson,
            collapsed: self.collapsed,
            max_title_width: self.max_title_width,
        }
    }
}

impl<S> CourseSidebar<S> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn sections(mut self, sections: Vec<CourseSection>) -> Self {
        self.sections = sections;
        self
    }

    pub fn active_lesson(mut self, lesson_id: impl Into<String>) -> Self {
        self.active_lesson = Some(lesson_id.into());
        self
    }

    /// Control the collapsed state from outside.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Section and lesson titles wider than this are truncated.
    pub fn max_title_width(mut self, width: usize) -> Self {
        self.max_title_width = width;
        self
    }
}

impl<'a> CourseSidebar<HasState<'a>> {
    /// Build the sidebar element.
    ///
    /// Handlers: `on_section_toggle` (`EventData::Toggle`), `on_lesson_select`
    /// (`EventData::Select`), `on_collapse_change` (`EventData::Toggle` with
    /// the sidebar id, `expanded` false when collapsed).
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let state = self.state_marker.0;
        let id = self.id.unwrap_or_else(|| "course-sidebar".into());
        let registry = registry.scope(&id);
        let sections_id = format!("{id}-sections");
        let toggle_id = format!("{id}-collapse");
        let width = self.max_title_width;

        let active = self.active_lesson.as_deref();
        let seed = || {
            ToggleSet::with_ids(
                self.sections
                    .iter()
                    .filter(|s| active.is_some_and(|lesson| s.contains_lesson(lesson)))
                    .map(|s| s.id.clone()),
            )
        };
        let expanded = state
            .expanded
            .modify(|slot| slot.get_or_insert_with(seed).clone());
        let collapsed = state.collapsed.resolve(self.collapsed.as_ref());

        // Collapse toggle
        {
            let local = state.collapsed.clone();
            let external = self.collapsed;
            let handlers = handlers.clone();
            let sidebar_id = id.clone();
            let element_id = toggle_id.clone();
            registry.register(
                &toggle_id,
                "on_click",
                handler(move |_| {
                    let next = !local.resolve(external.as_ref());
                    local.request(external.as_ref(), next);
                    debug!("sidebar {sidebar_id} collapsed={next}");
                    emit(
                        &handlers,
                        "on_collapse_change",
                        &element_id,
                        EventData::Toggle {
                            id: sidebar_id.clone(),
                            expanded: !next,
                        },
                    );
                }),
            );
        }

        let header = Element::new("header")
            .class("course-sidebar__header")
            .maybe_child(
                self.title
                    .as_deref()
                    .filter(|t| !webdom::text::is_blank(t))
                    .map(|t| {
                        Element::new("h2")
                            .class("course-sidebar__title")
                            .text_content(webdom::text::truncate_to_width(t, width))
                    }),
            )
            .child(
                Element::button(if collapsed { "»" } else { "«" })
                    .id(&toggle_id)
                    .class("course-sidebar__collapse")
                    .aria("label", if collapsed { "Expand sidebar" } else { "Collapse sidebar" })
                    .aria("expanded", (!collapsed).to_string())
                    .aria("controls", &sections_id),
            );

        let mut sections = Element::div()
            .id(&sections_id)
            .class("course-sidebar__sections")
            .flag_if(collapsed, "hidden");

        for section in self
            .sections
            .iter()
            .filter(|s| !webdom::text::is_blank(&s.title))
        {
            let is_expanded = expanded.contains(&section.id);
            let button_id = format!("{id}-section-{}", section.id);
            let lessons_id = format!("{button_id}-lessons");
            let (done, total) = section_progress(section);

            {
                let expanded = state.expanded.clone();
                let section_id = section.id.clone();
                let handlers = handlers.clone();
                let element_id = button_id.clone();
                registry.register(
                    &button_id,
                    "on_click",
                    handler(move |_| {
                        let now = expanded
                            .modify(|slot| slot.get_or_insert_with(ToggleSet::new).toggle(&section_id));
                        emit(
                            &handlers,
                            "on_section_toggle",
                            &element_id,
                            EventData::Toggle {
                                id: section_id.clone(),
                                expanded: now,
                            },
                        );
                    }),
                );
            }

            let heading = Element::button(webdom::text::truncate_to_width(&section.title, width))
                .id(&button_id)
                .class("course-sidebar__section-toggle")
                .aria("expanded", is_expanded.to_string())
                .aria("controls", &lessons_id)
                .child(
                    Element::text(format!("{done}/{total}"))
                        .class("course-sidebar__section-progress")
                        .aria("label", format!("{done} of {total} lessons completed")),
                );

            let mut lessons = Element::list()
                .id(&lessons_id)
                .class("course-sidebar__lessons")
                .flag_if(!is_expanded, "hidden");
            let visible: Vec<&CourseLesson> = section
                .lessons
                .iter()
                .filter(|l| !webdom::text::is_blank(&l.title))
                .collect();
            if visible.is_empty() {
                lessons = lessons.child(
                    Element::item()
                        .class("course-sidebar__empty")
                        .text_content("No lessons yet"),
                );
            }
            for lesson in visible {
                lessons = lessons.child(lesson_entry(
                    &registry,
                    handlers,
                    &id,
                    lesson,
                    active == Some(lesson.id.as_str()),
                    width,
                ));
            }

            sections = sections.child(
                Element::new("section")
                    .class("course-sidebar__section")
                    .class_if(is_expanded, "course-sidebar__section--expanded")
                    .child(heading)
                    .child(lessons),
            );
        }

        Element::new("aside")
            .id(&id)
            .class("course-sidebar")
            .class_if(collapsed, "course-sidebar--collapsed")
            .aria("label", "Course contents")
            .child(header)
            .child(sections)
    }
}

fn lesson_entry(
    registry: &RegistryScope,
    handlers: &WidgetHandlers,
    sidebar_id: &str,
    lesson: &CourseLesson,
    is_active: bool,
    width: usize,
) -> Element {
    let element_id = format!("{sidebar_id}-lesson-{}", lesson.id);
    let status = if lesson.locked {
        "locked"
    } else if lesson.completed {
        "completed"
    } else {
        "available"
    };

    let mut button = Element::button(webdom::text::truncate_to_width(&lesson.title, width))
        .id(&element_id)
        .class("course-sidebar__lesson-link")
        .data("status", status)
        .flag_if(lesson.locked, "disabled");
    if lesson.locked {
        button = button.aria("disabled", "true");
    } else if let Some(callback) = handlers.get("on_lesson_select").cloned() {
        let lesson_id = lesson.id.clone();
        let title = lesson.title.clone();
        let target = element_id.clone();
        registry.register(
            &element_id,
            "on_click",
            handler(move |_| {
                call_handler(
                    &callback,
                    &target,
                    EventData::Select {
                        id: lesson_id.clone(),
                        label: title.clone(),
                    },
                );
            }),
        );
    }
    if is_active {
        button = button.aria("current", "page");
    }

    let marker = match status {
        "locked" => Some("🔒"),
        "completed" => Some("✓"),
        _ => None,
    };

    Element::item()
        .class("course-sidebar__lesson")
        .class(format!("course-sidebar__lesson--{status}"))
        .class_if(is_active, "course-sidebar__lesson--active")
        .maybe_child(marker.map(|m| {
            Element::text(m)
                .class("course-sidebar__marker")
                .aria("hidden", "true")
        }))
        .child(button)
        .maybe_child(lesson.duration_minutes.map(|minutes| {
            Element::text(format!("{minutes} min")).class("course-sidebar__duration")
        }))
}
