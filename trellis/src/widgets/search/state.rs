//! Search box instance state and the controller that drives it.

use std::collections::HashSet;
use std::sync::{Arc, Weak};
use std::time::Duration;

use log::debug;
use webdom::Key;

use crate::config::SearchConfig;
use crate::controlled::Controlled;
use crate::handler_context::{emit, EventData, WidgetHandlers};
use crate::state::State;
use crate::timer::DelayedTask;
use crate::toggle_set::ToggleSet;

use super::filter::{filter_suggestions, is_searchable, FilterOptions, MatchMode};
use super::highlight::highlight;
use super::history::RecentSearches;
use super::item::{SearchEntry, SearchFilter, SearchSuggestion, SuggestionKind, SuggestionMatch};

/// Transient state of one search box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchBoxState {
    /// Last query that passed the debounce and the length threshold.
    pub committed: Option<String>,
    /// Whether the suggestion list is open.
    pub open: bool,
    /// Index into `results` of the keyboard-highlighted entry.
    pub highlighted: Option<usize>,
    pub filters: ToggleSet,
    pub history: RecentSearches,
    pub results: Vec<SuggestionMatch>,
}

/// Props the controller needs between builds (timers fire after `build`).
#[derive(Clone, Default)]
pub(crate) struct SearchProps {
    /// Element id of the search box, reported to callbacks.
    pub id: String,
    pub suggestions: Vec<SearchSuggestion>,
    pub filters: Vec<SearchFilter>,
    pub filter_options: FilterOptions,
    pub debounce: Duration,
    pub show_history: bool,
    /// Controlled input text.
    pub value: Option<String>,
    pub handlers: WidgetHandlers,
}

/// Merge history, filters and suggestions into one list.
///
/// Sources are taken in that order. An entry whose id was already seen is
/// skipped, as is any entry whose label matches a recent search.
pub fn combine_entries(
    history: &[String],
    filters: &[SearchFilter],
    suggestions: &[SearchSuggestion],
) -> Vec<SearchEntry> {
    let mut seen_ids = HashSet::new();
    let mut recent_labels = HashSet::new();
    let mut out = Vec::new();

    for label in history {
        let lowered = label.to_lowercase();
        if recent_labels.insert(lowered) {
            seen_ids.insert(format!("recent:{label}"));
            out.push(SearchEntry {
                id: format!("recent:{label}"),
                label: label.clone(),
                kind: SuggestionKind::Recent,
                description: None,
                category: None,
            });
        }
    }

    let rest = filters
        .iter()
        .map(SearchEntry::from)
        .chain(suggestions.iter().map(SearchEntry::from));
    for entry in rest {
        if webdom::text::is_blank(&entry.label)
            || recent_labels.contains(&entry.label.to_lowercase())
            || !seen_ids.insert(entry.id.clone())
        {
            continue;
        }
        out.push(entry);
    }
    out
}

struct Inner {
    state: State<SearchBoxState>,
    input: Controlled<String>,
    props: State<SearchProps>,
    debounce: DelayedTask,
}

impl Inner {
    fn input_text(&self) -> String {
        let value = self.props.with(|p| p.value.clone());
        self.input.resolve(value.as_ref())
    }

    fn set_input(&self, text: String) {
        let value = self.props.with(|p| p.value.clone());
        self.input.request(value.as_ref(), text);
    }

    fn emit(&self, name: &str, data: EventData) {
        let (id, handlers) = self.props.with(|p| (p.id.clone(), p.handlers.clone()));
        emit(&handlers, name, &id, data);
    }

    fn matches_for(&self, query: &str) -> Vec<SuggestionMatch> {
        let props = self.props.get();
        let history = if props.show_history {
            self.state.with(|s| s.history.entries().to_vec())
        } else {
            Vec::new()
        };
        let entries = combine_entries(&history, &props.filters, &props.suggestions);

        filter_suggestions(query, &entries, &props.filter_options)
            .into_iter()
            .map(|entry| SuggestionMatch {
                segments: highlight(&entry.label, query),
                entry,
            })
            .collect()
    }

    /// Debounced commit of `query`.
    fn commit(&self, query: &str) {
        let min = self.props.with(|p| p.filter_options.min_query_length);

        if !is_searchable(query, min) {
            debug!("search query {query:?} below threshold, clearing suggestions");
            self.state.update(|s| {
                s.committed = None;
                s.results.clear();
                s.open = false;
                s.highlighted = None;
            });
            return;
        }

        let query = query.trim().to_string();
        let results = self.matches_for(&query);
        debug!("search committed {query:?} with {} results", results.len());
        self.state.update(|s| {
            s.committed = Some(query.clone());
            s.results = results;
            s.open = true;
            s.highlighted = None;
        });
        self.emit("on_search", EventData::Query(query));
    }
}

/// Weak counterpart of `SearchController`, captured by registered handlers.
#[derive(Clone)]
pub(crate) struct WeakSearchController(Weak<Inner>);

impl WeakSearchController {
    pub(crate) fn upgrade(&self) -> Option<SearchController> {
        self.0.upgrade().map(|inner| SearchController { inner })
    }
}

/// Drives one search box: typed text, debounced commits, keyboard
/// navigation, selection, filters and recent-search history.
///
/// Clones share the same instance. Handlers registered by `SearchBox` hold
/// weak references to it.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("input", &self.input_text())
            .field("state", &self.snapshot())
            .finish()
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self::with_config(&SearchConfig::default())
    }

    /// Seed filter options, debounce and history limit from a config.
    pub fn with_config(config: &SearchConfig) -> Self {
        let props = SearchProps {
            filter_options: FilterOptions {
                min_query_length: config.min_query_length,
                max_results: config.max_suggestions,
                mode: MatchMode::Substring,
            },
            debounce: config.debounce(),
            id: "search".into(),
            show_history: true,
            ..Default::default()
        };
        let state = SearchBoxState {
            history: RecentSearches::new(config.history_limit),
            ..Default::default()
        };
        Self {
            inner: Arc::new(Inner {
                state: State::new(state),
                input: Controlled::new(String::new()),
                props: State::new(props),
                debounce: DelayedTask::new(),
            }),
        }
    }

    pub(crate) fn props(&self) -> SearchProps {
        self.inner.props.get()
    }

    pub(crate) fn set_props(&self, props: SearchProps) {
        self.inner.props.set(props);
    }

    pub(crate) fn set_history_limit(&self, limit: usize) {
        self.inner.state.update(|s| s.history.set_limit(limit));
    }

    /// A handle that does not keep the instance alive.
    pub(crate) fn downgrade(&self) -> WeakSearchController {
        WeakSearchController(Arc::downgrade(&self.inner))
    }

    /// Current input text (the controlled value when one is supplied).
    pub fn input_text(&self) -> String {
        self.inner.input_text()
    }

    /// Snapshot of the instance state.
    pub fn snapshot(&self) -> SearchBoxState {
        self.inner.state.get()
    }

    pub fn results(&self) -> Vec<SuggestionMatch> {
        self.inner.state.with(|s| s.results.clone())
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.with(|s| s.open)
    }

    pub fn is_commit_pending(&self) -> bool {
        self.inner.debounce.is_pending()
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Text changed. Schedules the debounced commit.
    pub fn input(&self, text: &str) {
        self.inner.set_input(text.to_string());
        self.inner.emit(
            "on_change",
            EventData::Change {
                text: text.to_string(),
            },
        );

        let delay = self.inner.props.with(|p| p.debounce);
        if delay.is_zero() {
            self.inner.debounce.cancel();
            self.inner.commit(text);
            return;
        }
        let weak = Arc::downgrade(&self.inner);
        let text = text.to_string();
        self.inner.debounce.schedule(delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.commit(&text);
            }
        });
    }

    /// Keyboard navigation on the input.
    pub fn key(&self, key: Key) {
        match key {
            Key::Down | Key::Up => {
                self.inner.state.update(|s| {
                    let count = s.results.len();
                    if count == 0 {
                        return;
                    }
                    s.open = true;
                    s.highlighted = Some(match (key, s.highlighted) {
                        (Key::Down, Some(i)) => (i + 1) % count,
                        (Key::Down, None) => 0,
                        (_, Some(i)) => (i + count - 1) % count,
                        (_, None) => count - 1,
                    });
                });
            }
            Key::Enter => {
                let highlighted = self
                    .inner
                    .state
                    .with(|s| s.highlighted.filter(|_| s.open));
                match highlighted {
                    Some(index) => self.select(index),
                    None => self.submit(),
                }
            }
            Key::Escape => self.close(),
            _ => {}
        }
    }

    /// Close the suggestion list.
    pub fn close(&self) {
        self.inner.state.update(|s| {
            s.open = false;
            s.highlighted = None;
        });
    }

    /// Choose the result at `index`.
    ///
    /// Filter entries toggle their filter. Other entries replace the input
    /// text, close the list and invoke `on_select`.
    pub fn select(&self, index: usize) {
        let Some(entry) = self
            .inner
            .state
            .with(|s| s.results.get(index).map(|m| m.entry.clone()))
        else {
            return;
        };

        if entry.kind == SuggestionKind::Filter {
            self.toggle_filter(&entry.id);
            self.close();
            return;
        }

        self.inner.debounce.cancel();
        self.inner.set_input(entry.label.clone());
        self.inner.state.update(|s| {
            s.history.record(&entry.label);
            s.open = false;
            s.highlighted = None;
        });
        self.inner.emit(
            "on_select",
            EventData::Suggestion {
                id: entry.id,
                label: entry.label,
                kind: entry.kind,
            },
        );
    }

    /// Submit the raw input text.
    pub fn submit(&self) {
        let query = self.input_text().trim().to_string();
        self.inner.debounce.cancel();
        if query.is_empty() {
            return;
        }
        self.inner.state.update(|s| {
            s.history.record(&query);
            s.open = false;
            s.highlighted = None;
        });
        self.inner.emit("on_submit", EventData::Query(query));
    }

    /// Flip a filter on or off and report the new selection.
    pub fn toggle_filter(&self, id: &str) {
        let active = self.inner.state.modify(|s| {
            s.filters.toggle(id);
            s.filters.to_vec()
        });
        self.inner.emit("on_filter_change", EventData::Filters(active));
    }

    /// Clear the input and cancel any pending commit.
    pub fn clear(&self) {
        self.inner.debounce.cancel();
        self.inner.set_input(String::new());
        self.inner.state.update(|s| {
            s.committed = None;
            s.results.clear();
            s.open = false;
            s.highlighted = None;
        });
        self.inner.emit("on_clear", EventData::None);
    }

    /// Recompute results for the committed query against the latest props.
    pub(crate) fn refresh(&self) {
        if let Some(query) = self.inner.state.with(|s| s.committed.clone()) {
            let results = self.inner.matches_for(&query);
            self.inner.state.update(|s| {
                if let Some(h) = s.highlighted {
                    if h >= results.len() {
                        s.highlighted = None;
                    }
                }
                s.results = results;
            });
        }
    }
}
