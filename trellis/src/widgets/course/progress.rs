use webdom::Element;

use crate::types::{modifier, WidgetSize};

/// Whole-number completion percentage, clamped to 0-100. Zero when there is
/// nothing to complete.
pub fn progress_percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = f64::from(completed.min(total)) / f64::from(total);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// A course progress bar builder.
///
/// # Example
///
/// ```ignore
/// CourseProgress::new()
///     .completed(7)
///     .total(12)
///     .label("Rust fundamentals")
///     .build()
/// ```
#[derive(Clone, Debug, Default)]
pub struct CourseProgress {
    id: Option<String>,
    completed: u32,
    total: u32,
    label: Option<String>,
    show_count: bool,
    size: WidgetSize,
}

impl CourseProgress {
    pub fn new() -> Self {
        Self {
            show_count: true,
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn completed(mut self, lessons: u32) -> Self {
        self.completed = lessons;
        self
    }

    pub fn total(mut self, lessons: u32) -> Self {
        self.total = lessons;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Show "X of Y lessons" under the bar (default true).
    pub fn show_count(mut self, show: bool) -> Self {
        self.show_count = show;
        self
    }

    pub fn size(mut self, size: WidgetSize) -> Self {
        self.size = size;
        self
    }

    /// Build the progress element. Purely presentational, registers nothing.
    pub fn build(self) -> Element {
        let id = self.id.unwrap_or_else(|| "course-progress".into());
        let percent = progress_percent(self.completed, self.total);
        let label = self
            .label
            .filter(|l| !webdom::text::is_blank(l))
            .unwrap_or_else(|| "Course progress".into());

        let bar = Element::div()
            .class("course-progress__track")
            .role("progressbar")
            .aria("label", &label)
            .aria("valuenow", percent.to_string())
            .aria("valuemin", "0")
            .aria("valuemax", "100")
            .child(
                Element::div()
                    .class("course-progress__fill")
                    .attr("style", format!("width: {percent}%;")),
            );

        let count = self.show_count.then(|| {
            let noun = if self.total == 1 { "lesson" } else { "lessons" };
            Element::text(format!(
                "{} of {} {noun}",
                self.completed.min(self.total),
                self.total
            ))
            .class("course-progress__count")
        });

        Element::div()
            .id(&id)
            .class("course-progress")
            .class(modifier("course-progress", self.size.as_str()))
            .class_if(percent == 100, "course-progress--complete")
            .child(
                Element::div()
                    .class("course-progress__header")
                    .child(Element::text(label).class("course-progress__label"))
                    .child(Element::text(format!("{percent}%")).class("course-progress__percent")),
            )
            .child(bar)
            .maybe_child(count)
    }
}
