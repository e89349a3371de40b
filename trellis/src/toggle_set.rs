use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of identifiers that are "on" (expanded sections, open dropdowns,
/// selected filters).
///
/// `toggle` is the only way to change membership after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSet {
    ids: BTreeSet<String>,
}

impl ToggleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set. Used once, when the owning instance is created.
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Flip membership of `id`. Returns whether it is now in the set.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Members in sorted order.
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ToggleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::with_ids(iter)
    }
}
