//! Course widgets - lesson navigation, progress, sidebar and catalog filters.

mod filter_bar;
mod navigation;
mod progress;
mod sidebar;

pub use filter_bar::{CourseFilterBar, CourseFilterBarState};
pub use navigation::CourseNavigation;
pub use progress::{progress_percent, CourseProgress};
pub use sidebar::{section_progress, CourseSidebar, CourseSidebarState};

use serde::{Deserialize, Serialize};

use crate::types::SortDirection;

/// A link to a neighbouring lesson.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonLink {
    pub id: String,
    pub title: String,
    pub href: String,
}

impl LessonLink {
    pub fn new(id: impl Into<String>, title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseLesson {
    pub id: String,
    pub title: String,
    pub duration_minutes: Option<u32>,
    pub completed: bool,
    pub locked: bool,
}

impl CourseLesson {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSection {
    pub id: String,
    pub title: String,
    pub lessons: Vec<CourseLesson>,
}

impl CourseSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lessons: Vec::new(),
        }
    }

    pub fn lessons(mut self, lessons: Vec<CourseLesson>) -> Self {
        self.lessons = lessons;
        self
    }

    pub fn contains_lesson(&self, lesson_id: &str) -> bool {
        self.lessons.iter().any(|l| l.id == lesson_id)
    }
}

/// A filter chip. Ids are unique across all groups of one filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
    pub count: Option<u32>,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            count: None,
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOption {
    pub id: String,
    pub label: String,
    /// Direction reported with `on_sort_change`, if the option implies one.
    pub direction: Option<SortDirection>,
}

impl SortOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            direction: None,
        }
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}
