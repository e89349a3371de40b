use serde::{Deserialize, Serialize};

/// Recent searches, most recent first.
///
/// Recording a query that is already present (ignoring case) moves it to the
/// front instead of duplicating it. The list never grows past its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearches {
    entries: Vec<String>,
    limit: usize,
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(5)
    }
}

impl RecentSearches {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest entries if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.entries.truncate(limit);
    }

    /// Record a query. Blank queries are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() || self.limit == 0 {
            return;
        }
        let lowered = query.to_lowercase();
        self.entries.retain(|e| e.to_lowercase() != lowered);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.limit);
    }

    pub fn remove(&mut self, query: &str) -> bool {
        let before = self.entries.len();
        let lowered = query.trim().to_lowercase();
        self.entries.retain(|e| e.to_lowercase() != lowered);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
