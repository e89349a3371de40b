//! Table widget - columns, rows and optional client-side sorting.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};
use webdom::Element;

use crate::controlled::Controlled;
use crate::handler_context::{call_handler, emit, handler, EventData};
use crate::render::{render_or_default, Renderer};
use crate::types::{modifier, Align, SortDirection};
use crate::{HandlerRegistry, WidgetHandlers};

// =============================================================================
// Column
// =============================================================================

/// A table column definition.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableColumn {
    /// Key passed to `TableRow::cell`.
    pub key: String,
    pub header: String,
    pub sortable: bool,
    pub align: Align,
    /// Cells wider than this many display columns are truncated.
    pub max_width: Option<usize>,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            ..Default::default()
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

// =============================================================================
// TableRow Trait
// =============================================================================

/// Trait for rows that can be displayed in a Table widget.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct Course {
///     slug: String,
///     title: String,
///     hours: u32,
/// }
///
/// impl TableRow for Course {
///     fn key(&self) -> String {
///         self.slug.clone()
///     }
///
///     fn cell(&self, column: &str) -> String {
///         match column {
///             "title" => self.title.clone(),
///             "hours" => self.hours.to_string(),
///             _ => String::new(),
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Unique key for this row, used in element ids and `on_row_click`.
    fn key(&self) -> String;

    /// Text for the given column key.
    fn cell(&self, column: &str) -> String;
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Direction shown for `column`, `None` when another column is sorted.
    pub fn direction_for(sort: Option<&SortState>, column: &str) -> Option<SortDirection> {
        sort.filter(|s| s.column == column).map(|s| s.direction)
    }

    /// Sort after a header click on `column`.
    ///
    /// Clicking the sorted column cycles ascending → descending → none.
    /// Clicking another column starts at ascending.
    pub fn next(current: Option<&SortState>, column: &str) -> Option<SortState> {
        SortDirection::cycle(Self::direction_for(current, column))
            .map(|direction| SortState::new(column, direction))
    }
}

fn numeric_cell(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compare two cell texts. Numeric cells sort before text cells and compare
/// by value; text compares case-insensitively. This is a total order, so
/// mixed columns sort consistently.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (numeric_cell(a), numeric_cell(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Rows in display order. Stable: equal cells keep their input order.
pub fn sort_rows<'r, T: TableRow>(rows: &'r [T], sort: Option<&SortState>) -> Vec<&'r T> {
    let mut sorted: Vec<&T> = rows.iter().collect();
    if let Some(sort) = sort {
        sorted.sort_by(|a, b| {
            let ordering = compare_cells(&a.cell(&sort.column), &b.cell(&sort.column));
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    sorted
}

// =============================================================================
// TableState
// =============================================================================

/// Local sort of a table instance. Ignored while the `sort` prop is set.
#[derive(Clone, Debug, Default)]
pub struct TableState {
    pub sort: Controlled<Option<SortState>>,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start sorted by `column`.
    pub fn sorted_by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            sort: Controlled::new(Some(SortState::new(column, direction))),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// Typestate marker: table needs a state reference.
pub struct NeedsState;

/// Typestate marker: table has a state reference.
pub struct HasState<'a>(&'a TableState);

/// A table widget builder.
///
/// # Example
///
/// ```ignore
/// Table::new(courses)
///     .columns(vec![
///         TableColumn::new("title", "Title").sortable().max_width(40),
///         TableColumn::new("hours", "Hours").sortable().align(Align::Right),
///     ])
///     .striped(true)
///     .state(&table_state)
///     .build(&registry, &handlers)
/// ```
pub struct Table<T: TableRow, S = NeedsState> {
    state_marker: S,
    id: Option<String>,
    caption: Option<String>,
    columns: Vec<TableColumn>,
    rows: Vec<T>,
    sort: Option<Option<SortState>>,
    striped: bool,
    hoverable: bool,
    compact: bool,
    empty_message: Option<String>,
    empty_renderer: Option<Renderer<()>>,
}

impl<T: TableRow> Table<T, NeedsState> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            state_marker: NeedsState,
            id: None,
            caption: None,
            columns: Vec::new(),
            rows,
            sort: None,
            striped: false,
            hoverable: false,
            compact: false,
            empty_message: None,
            empty_renderer: None,
        }
    }

    /// Set the state reference. Required before calling `build()`.
    pub fn state(self, state: &TableState) -> Table<T, HasState<'_>> {
        Table {
            state_marker: HasState(state),
            id: self.id,
            caption: self.caption,
            columns: self.columns,
            rows: self.rows,
            sort: self.sort,
            striped: self.striped,
            hoverable: self.hoverable,
            compact: self.compact,
            empty_message: self.empty_message,
            empty_renderer: self.empty_renderer,
        }
    }
}

impl<T: TableRow, S> Table<T, S> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn columns(mut self, columns: Vec<TableColumn>) -> Self {
        self.columns = columns;
        self
    }

    /// Control the sort from outside. `None` means unsorted.
    pub fn sort(mut self, sort: Option<SortState>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn striped(mut self, striped: bool) -> Self {
        self.striped = striped;
        self
    }

    pub fn hoverable(mut self, hoverable: bool) -> Self {
        self.hoverable = hoverable;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    /// Custom empty-state markup. Falls back to the message when it fails.
    pub fn empty_renderer(mut self, renderer: Renderer<()>) -> Self {
        self.empty_renderer = Some(renderer);
        self
    }
}

impl<'a, T: TableRow> Table<T, HasState<'a>> {
    /// Build the table element.
    ///
    /// Handlers: `on_sort` with `EventData::Sort` from sortable headers,
    /// `on_row_click` with `EventData::Row(key)`.
    pub fn build(self, registry: &HandlerRegistry, handlers: &WidgetHandlers) -> Element {
        let state = self.state_marker.0;
        let id = self.id.unwrap_or_else(|| "table".into());
        let registry = registry.scope(&id);
        let sort = state.sort.resolve(self.sort.as_ref());

        // Header
        let mut header_row = Element::new("tr").class("table__header-row");
        for column in &self.columns {
            let align = modifier("table__cell", column.align.as_str());
            let mut th = Element::new("th")
                .class("table__header")
                .class(align)
                .attr("scope", "col");

            if !column.sortable {
                header_row = header_row.child(th.text_content(&column.header));
                continue;
            }

            let direction = SortState::direction_for(sort.as_ref(), &column.key);
            th = th.aria("sort", direction.map_or("none", SortDirection::as_str));

            let button_id = format!("{id}-sort-{}", column.key);
            {
                let local = state.sort.clone();
                let external = self.sort.clone();
                let column_key = column.key.clone();
                let handlers = handlers.clone();
                let element_id = button_id.clone();
                registry.register(
                    &button_id,
                    "on_click",
                    handler(move |_| {
                        let current = local.resolve(external.as_ref());
                        let next = SortState::next(current.as_ref(), &column_key);
                        debug!("table sort {column_key}: {next:?}");
                        local.request(external.as_ref(), next.clone());
                        emit(
                            &handlers,
                            "on_sort",
                            &element_id,
                            EventData::Sort {
                                column: column_key.clone(),
                                direction: next.map(|s| s.direction),
                            },
                        );
                    }),
                );
            }

            let indicator = match direction {
                Some(SortDirection::Ascending) => "▲",
                Some(SortDirection::Descending) => "▼",
                None => "↕",
            };
            header_row = header_row.child(
                th.child(
                    Element::button(column.header.clone())
                        .id(&button_id)
                        .class("table__sort")
                        .child(
                            Element::text(indicator)
                                .class("table__sort-indicator")
                                .aria("hidden", "true"),
                        ),
                ),
            );
        }

        // Body
        let mut body = Element::new("tbody").class("table__body");
        if self.rows.is_empty() {
            let message = self
                .empty_message
                .clone()
                .unwrap_or_else(|| "No data available".into());
            let content = render_or_default(self.empty_renderer.as_ref(), &(), "empty state", || {
                Element::text(message)
            });
            body = body.child(
                Element::new("tr").class("table__empty").child(
                    Element::new("td")
                        .attr("colspan", self.columns.len().max(1).to_string())
                        .child(content),
                ),
            );
        }

        let on_row_click = handlers.get("on_row_click").cloned();
        for row in sort_rows(&self.rows, sort.as_ref()) {
            let key = row.key();
            let row_id = format!("{id}-row-{key}");

            if let Some(callback) = &on_row_click {
                let callback = callback.clone();
                let element_id = row_id.clone();
                let key = key.clone();
                registry.register(
                    &row_id,
                    "on_click",
                    handler(move |_| call_handler(&callback, &element_id, EventData::Row(key.clone()))),
                );
            }

            let mut tr = Element::new("tr")
                .id(&row_id)
                .class("table__row")
                .class_if(on_row_click.is_some(), "table__row--clickable")
                .data("key", &key);
            for column in &self.columns {
                let text = row.cell(&column.key);
                let shown = match column.max_width {
                    Some(width) => webdom::text::truncate_to_width(&text, width),
                    None => text.clone(),
                };
                let mut td = Element::new("td")
                    .class("table__cell")
                    .class(modifier("table__cell", column.align.as_str()));
                if shown != text {
                    td = td.attr("title", &text);
                }
                tr = tr.child(td.text_content(shown));
            }
            body = body.child(tr);
        }

        Element::new("table")
            .id(&id)
            .class("table")
            .class_if(self.striped, "table--striped")
            .class_if(self.hoverable, "table--hoverable")
            .class_if(self.compact, "table--compact")
            .maybe_child(
                self.caption
                    .as_ref()
                    .map(|caption| Element::new("caption").text_content(caption)),
            )
            .child(Element::new("thead").child(header_row))
            .child(body)
    }
}
