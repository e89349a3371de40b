//! Suggestion filtering: case-insensitive substring by default, nucleo-matcher
//! fuzzy scoring on request.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use super::highlight::contains_ignore_case;
use super::item::SearchItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Label contains the query, ignoring case. Input order is kept.
    #[default]
    Substring,
    /// Fuzzy subsequence match, best score first.
    Fuzzy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    pub min_query_length: usize,
    pub max_results: usize,
    pub mode: MatchMode,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_query_length: 2,
            max_results: 8,
            mode: MatchMode::Substring,
        }
    }
}

/// Result of a fuzzy filter operation.
#[derive(Debug, Clone)]
pub struct FilterMatch {
    /// Index of the matched item in the original list.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Whether `query` is long enough to search for.
///
/// The query is trimmed first; length is counted in chars.
pub fn is_searchable(query: &str, min_query_length: usize) -> bool {
    let trimmed = query.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= min_query_length
}

/// Filter `entries` against `query`.
///
/// Returns nothing when the trimmed query is empty or shorter than
/// `min_query_length`. Substring mode keeps input order; fuzzy mode orders by
/// score. Either way at most `max_results` entries come back.
///
/// # Example
///
/// ```ignore
/// let labels = vec!["Rust Basics".to_string(), "Advanced Rust".to_string(), "Go".to_string()];
/// let hits = filter_suggestions("rust", &labels, &FilterOptions::default());
/// // ["Rust Basics", "Advanced Rust"]
/// ```
pub fn filter_suggestions<T: SearchItem + Clone>(
    query: &str,
    entries: &[T],
    options: &FilterOptions,
) -> Vec<T> {
    if !is_searchable(query, options.min_query_length) {
        return Vec::new();
    }
    let query = query.trim();

    match options.mode {
        MatchMode::Substring => entries
            .iter()
            .filter(|entry| contains_ignore_case(entry.search_label(), query))
            .take(options.max_results)
            .cloned()
            .collect(),
        MatchMode::Fuzzy => {
            let labels: Vec<&str> = entries.iter().map(T::search_label).collect();
            fuzzy_filter(query, &labels)
                .into_iter()
                .take(options.max_results)
                .filter_map(|m| entries.get(m.index).cloned())
                .collect()
        }
    }
}

/// Fuzzy filter using nucleo-matcher.
///
/// Returns matches sorted by score (highest first); ties keep input order.
/// Empty query returns all items with score 0.
pub fn fuzzy_filter(query: &str, items: &[&str]) -> Vec<FilterMatch> {
    // Empty query returns all items
    if query.is_empty() {
        return items
            .iter()
            .enumerate()
            .map(|(index, _)| FilterMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut matches: Vec<FilterMatch> = items
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| FilterMatch { index, score })
        })
        .collect();

    // Stable sort: equal scores stay in input order
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    matches
}
