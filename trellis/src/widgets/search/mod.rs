//! Search box widget - text input with filtered, highlighted suggestions.

mod filter;
mod highlight;
mod history;
mod item;
mod state;

pub use filter::{filter_suggestions, fuzzy_filter, is_searchable, FilterMatch, FilterOptions, MatchMode};
pub use highlight::{contains_ignore_case, find_ignore_case, highlight, highlight_element, Segment};
pub use history::RecentSearches;
pub use item::{SearchEntry, SearchFilter, SearchItem, SearchSuggestion, SuggestionKind, SuggestionMatch};
pub use state::{combine_entries, SearchBoxState, SearchController};

use std::time::Duration;

use log::trace;
use webdom::Element;

use crate::handler_context::handler;
use crate::{HandlerRegistry, RegistryScope, WidgetHandlers};

use state::WeakSearchController;

/// Typestate marker: search box needs a controller.
pub struct NeedsController;

/// Typestate marker: search box has a controller.
pub struct HasController<'a>(&'a SearchController);

/// A search box widget builder.
///
/// Props left unset keep the values the controller was created with (see
/// `SearchController::with_config`).
///
/// Debouncing needs a tokio runtime. A host that dispatches input events
/// outside one gets `on_search` on every keystroke, since the delayed commit
/// falls back to running immediately.
///
/// # Example
///
/// ```ignore
/// let search = SearchController::with_config(&config.search);
/// SearchBox::new()
///     .id("course-search")
///     .placeholder("Search courses")
///     .suggestions(course_suggestions)
///     .filters(vec![SearchFilter::new("free", "Free")])
///     .controller(&search)
///     .build(&registry, &handlers)
/// ```
pub struct SearchBox<S = NeedsController> {
    state_marker: S,
    id: Option<String>,
    label: Option<String>,
    placeholder: Option<String>,
    suggestions: Vec<SearchSuggestion>,
    filters: Vec<SearchFilter>,
    min_query_length: Option<usize>,
    max_suggestions: Option<usize>,
    debounce: Option<Duration>,
    match_mode: Option<MatchMode>,
    show_history: Option<bool>,
    history_limit: Option<usize>,
    value: Option<String>,
    disabled: bool,
    loading: bool,
}

impl Default for SearchBox<NeedsController> {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox<NeedsController> {
    pub fn new() -> Self {
        Self {
            state_marker: NeedsController,
            id: None,
            label: None,
            placeholder: None,
            suggestions: Vec::new(),
            filters: Vec::new(),
            min_query_length: None,
            max_suggestions: None,
            debounce: None,
            match_mode: None,
            show_history: None,
            history_limit: None,
            value: None,
            disabled: false,
            loading: false,
        }
    }

    /// Set the controller. Required before calling `build()`.
    pub fn controller(self, controller: &SearchController) -> SearchBox<HasController<'_>> {
        SearchBox {
            state_marker: HasController(controller),
            id: self.id,
            label: self.label,
            placeholder: self.placeholder,
            suggestions: self.suggestions,
            filters: self.filters,
            min_query_length: self.min_query_length,
            max_suggestions: self.max_suggestions,
            debounce: self.debounce,
            match_mode: self.match_mode,
            show_history: self.show_history,
            history_limit: self.history_limit,
            value: self.value,
            disabled: self.disabled,
            loading: self.loading,
        }
    }
}

impl<S> SearchBox<S> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Visible label for the input.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn suggestions(mut self, suggestions: Vec<SearchSuggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn filters(mut self, filters: Vec<SearchFilter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn min_query_length(mut self, min: usize) -> Self {
        self.min_query_length = Some(min);
        self
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = Some(max);
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = Some(debounce);
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    pub fn show_history(mut self, show: bool) -> Self {
        self.show_history = Some(show);
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Control the input text from outside.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Disabled search boxes register no handlers.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Show a loading indicator (results are being fetched by the caller).
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

fn register_controller_handler(
    registry: &RegistryScope,
    element_id: &str,
    event: &str,
    weak: &WeakSearchController,
    f: impl Fn(&SearchController, &crate::HandlerContext) + Send + Sync + 'static,
) {
    let weak = weak.clone();
    registry.register(
        element_id,
        event,
        handler(move |cx| {
            if let Some(controller) = weak.upgrade() {
                f(&controller, cx);
            }
        }),
    );
}

impl<'a> SearchBox<HasController<'a>> {
    /// Build the search box element.
    ///
    /// Registers input, key, option, filter chip and clear handlers unless
    /// disabled. Handlers: `on_search`, `on_submit`, `on_select`,
    /// `on_filter_change`, `on_clear`, `on_change`.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let controller = self.state_marker.0;
        let id = self.id.unwrap_or_else(|| "search".into());
        let registry = registry.scope(&id);
        let input_id = format!("{id}-input");
        let listbox_id = format!("{id}-listbox");
        let clear_id = format!("{id}-clear");

        let mut props = controller.props();
        props.id = id.clone();
        props.suggestions = self.suggestions;
        props.filters = self.filters.clone();
        props.value = self.value;
        props.handlers = handlers.clone();
        if let Some(min) = self.min_query_length {
            props.filter_options.min_query_length = min.max(1);
        }
        if let Some(max) = self.max_suggestions {
            props.filter_options.max_results = max;
        }
        if let Some(mode) = self.match_mode {
            props.filter_options.mode = mode;
        }
        if let Some(debounce) = self.debounce {
            props.debounce = debounce;
        }
        if let Some(show) = self.show_history {
            props.show_history = show;
        }
        controller.set_props(props);
        if let Some(limit) = self.history_limit {
            controller.set_history_limit(limit);
        }
        controller.refresh();

        let text = controller.input_text();
        let state = controller.snapshot();
        let open = state.open && !self.disabled;
        let option_id = |index: usize| format!("{id}-option-{index}");

        trace!("search box {id}: {} results, open={open}", state.results.len());

        // Input
        let mut input = Element::input("search")
            .id(&input_id)
            .class("search-box__input")
            .attr("value", &text)
            .attr("autocomplete", "off")
            .aria("autocomplete", "list")
            .aria("controls", &listbox_id)
            .flag_if(self.disabled, "disabled");
        if let Some(placeholder) = &self.placeholder {
            input = input.attr("placeholder", placeholder);
        }
        if let Some(index) = state.highlighted.filter(|_| open) {
            input = input.aria("activedescendant", option_id(index));
        }

        let label = self.label.map(|label| {
            Element::new("label")
                .class("search-box__label")
                .attr("for", &input_id)
                .text_content(label)
        });

        let clear = (!text.is_empty() && !self.disabled).then(|| {
            Element::button("×")
                .id(&clear_id)
                .class("search-box__clear")
                .aria("label", "Clear search")
        });

        // Filter chips
        let filter_ids: Vec<String> = self
            .filters
            .iter()
            .filter(|f| !webdom::text::is_blank(&f.label))
            .map(|f| f.id.clone())
            .collect();
        let chips = (!filter_ids.is_empty()).then(|| {
            Element::div()
                .class("search-box__filters")
                .role("group")
                .aria("label", "Filters")
                .children(
                    self.filters
                        .iter()
                        .filter(|f| !webdom::text::is_blank(&f.label))
                        .map(|f| {
                            let active = state.filters.contains(&f.id);
                            let mut chip = Element::button(f.label.clone())
                                .id(format!("{id}-filter-{}", f.id))
                                .class("search-box__filter")
                                .class_if(active, "search-box__filter--active")
                                .aria("pressed", active.to_string())
                                .flag_if(self.disabled, "disabled");
                            if let Some(count) = f.count {
                                chip = chip.child(
                                    Element::text(count.to_string()).class("search-box__count"),
                                );
                            }
                            chip
                        }),
                )
        });

        // Suggestion list
        let mut listbox = Element::list()
            .id(&listbox_id)
            .class("search-box__suggestions")
            .role("listbox")
            .flag_if(!open, "hidden");
        if open && state.results.is_empty() {
            if let Some(query) = &state.committed {
                listbox = listbox.child(
                    Element::item()
                        .class("search-box__empty")
                        .role("presentation")
                        .text_content(format!("No results for “{query}”")),
                );
            }
        }
        for (index, result) in state.results.iter().enumerate() {
            let selected = state.highlighted == Some(index);
            let option = Element::item()
                .id(option_id(index))
                .class("search-box__option")
                .class(format!("search-box__option--{}", result.entry.kind.as_str()))
                .role("option")
                .aria("selected", selected.to_string())
                .data("kind", result.entry.kind.as_str())
                .child(highlight_element(&result.segments))
                .maybe_child(result.entry.description.as_ref().map(|description| {
                    Element::text(description).class("search-box__description")
                }));
            listbox = listbox.child(option);
        }

        let status = self.loading.then(|| {
            Element::text("Loading…")
                .class("search-box__status")
                .role("status")
                .aria("live", "polite")
        });

        // Handlers
        if !self.disabled {
            let weak = controller.downgrade();
            register_controller_handler(&registry, &input_id, "on_input", &weak, |c, cx| {
                if let Some(text) = cx.event().text() {
                    c.input(text);
                }
            });
            register_controller_handler(&registry, &input_id, "on_key", &weak, |c, cx| {
                if let Some(key) = cx.event().key() {
                    c.key(key);
                }
            });
            if clear.is_some() {
                register_controller_handler(&registry, &clear_id, "on_click", &weak, |c, _| {
                    c.clear();
                });
            }
            for filter_id in filter_ids {
                let chip_id = format!("{id}-filter-{filter_id}");
                register_controller_handler(&registry, &chip_id, "on_click", &weak, move |c, _| {
                    c.toggle_filter(&filter_id);
                });
            }
            for index in 0..state.results.len() {
                register_controller_handler(
                    &registry,
                    &option_id(index),
                    "on_click",
                    &weak,
                    move |c, _| c.select(index),
                );
            }
        }

        Element::div()
            .id(&id)
            .class("search-box")
            .class_if(self.disabled, "search-box--disabled")
            .class_if(self.loading, "search-box--loading")
            .role("combobox")
            .aria("expanded", open.to_string())
            .aria("haspopup", "listbox")
            .aria("owns", &listbox_id)
            .maybe_child(label)
            .child(input)
            .maybe_child(clear)
            .maybe_child(chips)
            .child(listbox)
            .maybe_child(status)
    }
}
