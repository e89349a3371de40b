use log::warn;
use webdom::Element;

use super::{FilterOption, SortOption};
use crate::controlled::Controlled;
use crate::handler_context::{emit, handler, EventData};
use crate::toggle_set::ToggleSet;
use crate::{HandlerRegistry, WidgetHandlers};

/// Local selection of a filter bar. Ignored while the matching prop is set.
#[derive(Debug, Clone, Default)]
pub struct CourseFilterBarState {
    pub selected: Controlled<ToggleSet>,
    pub sort: Controlled<Option<String>>,
}

impl CourseFilterBarState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Typestate marker: filter bar needs a state reference.
pub struct NeedsState;

/// Typestate marker: filter bar has a state reference.
pub struct HasState<'a>(&'a CourseFilterBarState);

/// Catalog filter bar: category and level chips, a sort select and the
/// result count.
///
/// # Example
///
/// ```ignore
/// CourseFilterBar::new()
///     .categories(vec![FilterOption::new("web", "Web").count(12)])
///     .levels(vec![FilterOption::new("beginner", "Beginner")])
///     .sort_options(vec![SortOption::new("newest", "Newest")])
///     .result_count(courses.len())
///     .state(&filter_state)
///     .build(&registry, &handlers)
/// ```
pub struct CourseFilterBar<S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    categories: Vec<FilterOption>,
    levels: Vec<FilterOption>,
    sort_options: Vec<SortOption>,
    selected: Option<ToggleSet>,
    sort: Option<Option<String>>,
    result_count: Option<usize>,
}

impl Default for CourseFilterBar<NeedsState> {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseFilterBar<NeedsState> {
    pub fn new() -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            categories: Vec::new(),
            levels: Vec::new(),
            sort_options: Vec::new(),
            selected: None,
            sort: None,
            result_count: None,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state(self, state: &CourseFilterBarState) -> CourseFilterBar<HasState<'_>> {
        CourseFilterBar {
            state_marker: HasState(state),
            id: self.id,
            categories: self.categories,
            levels: self.levels,
            sort_options: self.sort_options,
            selected: self.selected,
            sort: self.sort,
            result_count: self.result_count,
        }
    }
}

impl<S> CourseFilterBar<S> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn categories(mut self, options: Vec<FilterOption>) -> Self {
        self.categories = options;
        self
    }

    pub fn levels(mut self, options: Vec<FilterOption>) -> Self {
        self.levels = options;
        self
    }

    pub fn sort_options(mut self, options: Vec<SortOption>) -> Self {
        self.sort_options = options;
        self
    }

    /// Control the selected filter ids from outside.
    pub fn selected<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.selected = Some(ToggleSet::with_ids(ids));
        self
    }

    /// Control the selected sort option from outside.
    pub fn sort(mut self, sort: Option<String>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn result_count(mut self, count: usize) -> Self {
        self.result_count = Some(count);
        self
    }
}

impl<'a> CourseFilterBar<HasState<'a>> {
    /// Build the filter bar element.
    ///
    /// Handlers: `on_filter_change` with `EventData::Filters` (sorted ids),
    /// `on_sort_change` with `EventData::Sort`.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let state = self.state_marker.0;
        let id = self.id.unwrap_or_else(|| "course-filters".into());
        let registry = registry.scope(&id);
        let selected = state.selected.resolve(self.selected.as_ref());
        let sort = state.sort.resolve(self.sort.as_ref());

        let group = |name: &str, label: &str, options: &[FilterOption]| {
            let options: Vec<&FilterOption> = options
                .iter()
                .filter(|o| !webdom::text::is_blank(&o.label))
                .collect();
            if options.is_empty() {
                return None;
            }

            let mut group = Element::div()
                .class("course-filters__group")
                .class(format!("course-filters__group--{name}"))
                .role("group")
                .aria("label", label);
            for option in options {
                let chip_id = format!("{id}-chip-{}", option.id);
                let active = selected.contains(&option.id);

                let local = state.selected.clone();
                let external = self.selected.clone();
                let option_id = option.id.clone();
                let handlers = handlers.clone();
                let element_id = chip_id.clone();
                registry.register(
                    &chip_id,
                    "on_click",
                    handler(move |_| {
                        let next = local.request_with(external.as_ref(), |set| {
                            set.toggle(&option_id);
                        });
                        emit(
                            &handlers,
                            "on_filter_change",
                            &element_id,
                            EventData::Filters(next.to_vec()),
                        );
                    }),
                );

                group = group.child(
                    Element::button(option.label.clone())
                        .id(&chip_id)
                        .class("course-filters__chip")
                        .class_if(active, "course-filters__chip--active")
                        .aria("pressed", active.to_string())
                        .maybe_child(option.count.map(|count| {
                            Element::text(count.to_string()).class("course-filters__count")
                        })),
                );
            }
            Some(group)
        };

        let categories = group("category", "Category", &self.categories);
        let levels = group("level", "Level", &self.levels);

        // Sort select
        let sort_select = (!self.sort_options.is_empty()).then(|| {
            let select_id = format!("{id}-sort");
            {
                let local = state.sort.clone();
                let external = self.sort.clone();
                let options = self.sort_options.clone();
                let handlers = handlers.clone();
                let element_id = select_id.clone();
                registry.register(
                    &select_id,
                    "on_input",
                    handler(move |cx| {
                        let Some(value) = cx.event().text() else {
                            return;
                        };
                        let Some(option) = options.iter().find(|o| o.id == value) else {
                            warn!("ignoring unknown sort option {value:?}");
                            return;
                        };
                        local.request(external.as_ref(), Some(option.id.clone()));
                        emit(
                            &handlers,
                            "on_sort_change",
                            &element_id,
                            EventData::Sort {
                                column: option.id.clone(),
                                direction: option.direction,
                            },
                        );
                    }),
                );
            }

            let mut select = Element::new("select")
                .id(&select_id)
                .class("course-filters__sort");
            for option in &self.sort_options {
                let option_el = Element::new("option")
                    .attr("value", &option.id)
                    .flag_if(sort.as_deref() == Some(option.id.as_str()), "selected")
                    .text_content(&option.label);
                select = select.child(option_el);
            }
            Element::new("label")
                .class("course-filters__sort-label")
                .child(Element::text("Sort by"))
                .child(select)
        });

        let count = self.result_count.map(|count| {
            let noun = if count == 1 { "result" } else { "results" };
            Element::text(format!("{count} {noun}"))
                .class("course-filters__results")
                .role("status")
                .aria("live", "polite")
        });

        let clear = (!selected.is_empty()).then(|| {
            let clear_id = format!("{id}-clear");
            let local = state.selected.clone();
            let external = self.selected.clone();
            let handlers = handlers.clone();
            let element_id = clear_id.clone();
            registry.register(
                &clear_id,
                "on_click",
                handler(move |_| {
                    local.request(external.as_ref(), ToggleSet::new());
                    emit(
                        &handlers,
                        "on_filter_change",
                        &element_id,
                        EventData::Filters(Vec::new()),
                    );
                }),
            );
            Element::button("Clear all")
                .id(clear_id)
                .class("course-filters__clear")
        });

        Element::div()
            .id(&id)
            .class("course-filters")
            .role("search")
            .aria("label", "Filter courses")
            .maybe_child(categories)
            .maybe_child(levels)
            .maybe_child(sort_select)
            .maybe_child(count)
            .maybe_child(clear)
    }
}
