//! Records shown in the search box and the trait the filter works on.

use serde::{Deserialize, Serialize};

use super::highlight::Segment;

/// Trait for anything the suggestion filter can match against.
///
/// # Example
///
/// ```ignore
/// struct Course {
///     slug: String,
///     title: String,
/// }
///
/// impl SearchItem for Course {
///     fn search_id(&self) -> &str {
///         &self.slug
///     }
///
///     fn search_label(&self) -> &str {
///         &self.title
///     }
/// }
/// ```
pub trait SearchItem {
    /// Unique identifier, used for de-duplication and selection.
    fn search_id(&self) -> &str;

    /// Display text. This is what the query is matched against.
    fn search_label(&self) -> &str;
}

impl SearchItem for String {
    fn search_id(&self) -> &str {
        self
    }

    fn search_label(&self) -> &str {
        self
    }
}

impl SearchItem for &str {
    fn search_id(&self) -> &str {
        self
    }

    fn search_label(&self) -> &str {
        self
    }
}

/// A caller-supplied suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSuggestion {
    pub id: String,
    pub label: String,
    /// Value submitted in place of the label, when different.
    pub value: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl SearchSuggestion {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SearchItem for SearchSuggestion {
    fn search_id(&self) -> &str {
        &self.id
    }

    fn search_label(&self) -> &str {
        &self.label
    }
}

/// A filter category the user can toggle from the search box.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    pub id: String,
    pub label: String,
    pub category: Option<String>,
    pub count: Option<u32>,
}

impl SearchFilter {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

impl SearchItem for SearchFilter {
    fn search_id(&self) -> &str {
        &self.id
    }

    fn search_label(&self) -> &str {
        &self.label
    }
}

/// Source of an entry in the combined suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    Recent,
    Filter,
    Suggestion,
}

impl SuggestionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Filter => "filter",
            Self::Suggestion => "suggestion",
        }
    }
}

/// One row of the combined list: a recent search, a filter or a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub id: String,
    pub label: String,
    pub kind: SuggestionKind,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl SearchItem for SearchEntry {
    fn search_id(&self) -> &str {
        &self.id
    }

    fn search_label(&self) -> &str {
        &self.label
    }
}

impl From<&SearchSuggestion> for SearchEntry {
    fn from(s: &SearchSuggestion) -> Self {
        Self {
            id: s.id.clone(),
            label: s.label.clone(),
            kind: SuggestionKind::Suggestion,
            description: s.description.clone(),
            category: s.category.clone(),
        }
    }
}

impl From<&SearchFilter> for SearchEntry {
    fn from(f: &SearchFilter) -> Self {
        Self {
            id: f.id.clone(),
            label: f.label.clone(),
            kind: SuggestionKind::Filter,
            description: None,
            category: f.category.clone(),
        }
    }
}

/// A filtered entry plus the segments used to highlight the query in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionMatch {
    pub entry: SearchEntry,
    pub segments: Vec<Segment>,
}
