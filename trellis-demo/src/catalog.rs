//! Sample course catalog bundled with the demo.

use serde::Deserialize;
use trellis::prelude::*;

const CATALOG_JSON: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub brand: NavBrand,
    pub nav: Vec<NavItem>,
    pub trail: Vec<BreadcrumbItem>,
    pub courses: Vec<CourseRecord>,
    pub filters: Vec<SearchFilter>,
    pub categories: Vec<FilterOption>,
    pub levels: Vec<FilterOption>,
    pub sort_options: Vec<SortOption>,
    pub plans: Vec<PricingPlan>,
    pub syllabus: Vec<CourseSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseRecord {
    pub slug: String,
    pub title: String,
    pub level: String,
    pub students: u32,
    #[serde(default)]
    pub summary: Option<String>,
}

impl TableRow for CourseRecord {
    fn key(&self) -> String {
        self.slug.clone()
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "title" => self.title.clone(),
            "level" => self.level.clone(),
            "students" => self.students.to_string(),
            _ => String::new(),
        }
    }
}

impl Catalog {
    pub fn bundled() -> Result<Self, serde_json::Error> {
        serde_json::from_str(CATALOG_JSON)
    }

    pub fn suggestions(&self) -> Vec<SearchSuggestion> {
        self.courses
            .iter()
            .map(|course| {
                let suggestion = SearchSuggestion::new(&course.slug, &course.title)
                    .category(&course.level);
                match &course.summary {
                    Some(summary) => suggestion.description(summary),
                    None => suggestion,
                }
            })
            .collect()
    }

    pub fn lesson_count(&self) -> (u32, u32) {
        let lessons = self.syllabus.iter().flat_map(|s| &s.lessons);
        let (done, total) = lessons.fold((0, 0), |(done, total), lesson| {
            (done + u32::from(lesson.completed), total + 1)
        });
        (done, total)
    }
}
