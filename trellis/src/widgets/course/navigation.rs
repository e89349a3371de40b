use webdom::Element;

use super::LessonLink;
use crate::handler_context::{call_handler, handler, EventData};
use crate::{HandlerRegistry, WidgetHandlers};

/// Previous/next lesson links with the current position.
///
/// # Example
///
/// ```ignore
/// CourseNavigation::new()
///     .previous(LessonLink::new("l2", "Ownership", "/lessons/l2"))
///     .next(LessonLink::new("l4", "Lifetimes", "/lessons/l4"))
///     .position(3, 12)
///     .build(&registry, &handlers)
/// ```
#[derive(Clone, Debug, Default)]
pub struct CourseNavigation {
    id: Option<String>,
    previous: Option<LessonLink>,
    next: Option<LessonLink>,
    current: u32,
    total: u32,
}

impl CourseNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn previous(mut self, lesson: LessonLink) -> Self {
        self.previous = Some(lesson);
        self
    }

    pub fn next(mut self, lesson: LessonLink) -> Self {
        self.next = Some(lesson);
        self
    }

    /// 1-based position of the current lesson.
    pub fn position(mut self, current: u32, total: u32) -> Self {
        self.current = current;
        self.total = total;
        self
    }

    /// Build the navigation element.
    ///
    /// Handlers: `on_navigate` with `EventData::Navigate { id: Some(lesson) }`.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let id = self.id.unwrap_or_else(|| "course-nav".into());
        let registry = registry.scope(&id);

        let link = |direction: &str, label: &str, lesson: Option<&LessonLink>| {
            let element_id = format!("{id}-{direction}");
            let class = format!("course-nav__{direction}");
            let Some(lesson) = lesson.filter(|l| !webdom::text::is_blank(&l.href)) else {
                return Element::span()
                    .id(&element_id)
                    .class("course-nav__link")
                    .class(class)
                    .class("course-nav__link--disabled")
                    .aria("disabled", "true")
                    .child(Element::text(label).class("course-nav__direction"));
            };

            if let Some(callback) = handlers.get("on_navigate").cloned() {
                let lesson_id = lesson.id.clone();
                let href = lesson.href.clone();
                let target = element_id.clone();
                registry.register(
                    &element_id,
                    "on_click",
                    handler(move |_| {
                        call_handler(
                            &callback,
                            &target,
                            EventData::Navigate {
                                id: Some(lesson_id.clone()),
                                href: href.clone(),
                            },
                        );
                    }),
                );
            }

            Element::link(&lesson.href)
                .id(&element_id)
                .class("course-nav__link")
                .class(class)
                .aria("label", format!("{label}: {}", lesson.title))
                .child(Element::text(label).class("course-nav__direction"))
                .child(Element::text(&lesson.title).class("course-nav__title"))
        };

        let previous = link("previous", "Previous lesson", self.previous.as_ref());
        let next = link("next", "Next lesson", self.next.as_ref());

        let position = (self.total > 0).then(|| {
            let current = self.current.clamp(1, self.total);
            Element::text(format!("Lesson {current} of {}", self.total))
                .class("course-nav__position")
                .aria("live", "polite")
        });

        Element::new("nav")
            .id(&id)
            .class("course-nav")
            .aria("label", "Lesson navigation")
            .child(previous)
            .maybe_child(position)
            .child(next)
    }
}
