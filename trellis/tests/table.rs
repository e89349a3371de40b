mod common;

use std::cmp::Ordering;

use common::{handlers, Calls};
use trellis::render::renderer;
use trellis::types::{Align, SortDirection};
use trellis::widgets::table::{
    compare_cells, sort_rows, SortState, Table, TableColumn, TableRow, TableState,
};
use trellis::{EventData, HandlerRegistry, WidgetHandlers};
use webdom::{find_by_class, find_by_tag, find_element, Element};

#[derive(Clone, Debug, PartialEq)]
struct Course {
    slug: &'static str,
    title: &'static str,
    students: u32,
}

impl TableRow for Course {
    fn key(&self) -> String {
        self.slug.to_string()
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "title" => self.title.to_string(),
            "students" => self.students.to_string(),
            _ => String::new(),
        }
    }
}

fn courses() -> Vec<Course> {
    vec![
        Course {
            slug: "rust",
            title: "Rust Basics",
            students: 120,
        },
        Course {
            slug: "go",
            title: "go for gophers",
            students: 9,
        },
        Course {
            slug: "zig",
            title: "Zig in Depth",
            students: 45,
        },
    ]
}

fn columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("title", "Course").sortable().max_width(10),
        TableColumn::new("students", "Students").sortable().align(Align::Right),
        TableColumn::new("notes", "Notes"),
    ]
}

fn row_keys(root: &Element) -> Vec<String> {
    find_by_class(root, "table__row")
        .iter()
        .filter_map(|row| row.get_data("key").cloned())
        .collect()
}

// =============================================================================
// Sorting helpers
// =============================================================================

#[test]
fn test_sort_cycle() {
    let asc = SortState::next(None, "title");
    assert_eq!(asc, Some(SortState::new("title", SortDirection::Ascending)));
    let desc = SortState::next(asc.as_ref(), "title");
    assert_eq!(desc, Some(SortState::new("title", SortDirection::Descending)));
    assert_eq!(SortState::next(desc.as_ref(), "title"), None);

    // A different column starts over at ascending.
    assert_eq!(
        SortState::next(desc.as_ref(), "students"),
        Some(SortState::new("students", SortDirection::Ascending))
    );
}

#[test]
fn test_compare_cells_is_numeric_aware() {
    assert_eq!(compare_cells("9", "120"), Ordering::Less);
    assert_eq!(compare_cells("apple", "Banana"), Ordering::Less);
    assert_eq!(compare_cells("10", "abc"), Ordering::Less);
}

#[test]
fn test_compare_cells_orders_mixed_values_consistently() {
    // numbers first, then text
    assert_eq!(compare_cells("9", "10"), Ordering::Less);
    assert_eq!(compare_cells("10", "1a"), Ordering::Less);
    assert_eq!(compare_cells("1a", "9"), Ordering::Greater);
    assert_eq!(compare_cells("NaN", "3"), Ordering::Greater);
    assert_eq!(compare_cells("inf", "Intro"), Ordering::Less);
}

#[test]
fn test_sort_rows_mixed_column_is_sorted() {
    #[derive(Clone)]
    struct Cell(String);

    impl TableRow for Cell {
        fn key(&self) -> String {
            self.0.clone()
        }

        fn cell(&self, _column: &str) -> String {
            self.0.clone()
        }
    }

    let rows: Vec<Cell> = (0..200)
        .map(|i| match i % 4 {
            0 => Cell(format!("{}", (i * 37) % 101)),
            1 => Cell(format!("{}a", i % 13)),
            2 => Cell(format!("{}.5", (i * 11) % 17)),
            _ => Cell(["beta", "Alpha", "-3"][(i / 4) % 3].to_string()),
        })
        .collect();

    let asc = SortState::new("value", SortDirection::Ascending);
    let sorted = sort_rows(&rows, Some(&asc));
    assert_eq!(sorted.len(), rows.len());
    for pair in sorted.windows(2) {
        assert_ne!(compare_cells(&pair[0].0, &pair[1].0), Ordering::Greater);
    }
    assert_eq!(sorted.first().map(|c| c.0.as_str()), Some("-3"));
}

#[test]
fn test_sort_rows_by_direction() {
    let rows = courses();
    let asc = SortState::new("students", SortDirection::Ascending);
    let slugs: Vec<&str> = sort_rows(&rows, Some(&asc)).iter().map(|c| c.slug).collect();
    assert_eq!(slugs, vec!["go", "zig", "rust"]);

    let desc = SortState::new("title", SortDirection::Descending);
    let slugs: Vec<&str> = sort_rows(&rows, Some(&desc)).iter().map(|c| c.slug).collect();
    assert_eq!(slugs, vec!["zig", "rust", "go"]);

    let slugs: Vec<&str> = sort_rows(&rows, None).iter().map(|c| c.slug).collect();
    assert_eq!(slugs, vec!["rust", "go", "zig"]);
}

// =============================================================================
// Widget
// =============================================================================

#[test]
fn test_table_markup() {
    let registry = HandlerRegistry::new();
    let state = TableState::new();
    let root = Table::new(courses())
        .id("courses")
        .caption("All courses")
        .columns(columns())
        .striped(true)
        .state(&state)
        .build(&registry, &WidgetHandlers::new());

    assert_eq!(root.tag, "table");
    assert!(root.has_class("table--striped"));
    assert_eq!(find_by_tag(&root, "caption")[0].inner_text(), "All courses");

    let headers = find_by_tag(&root, "th");
    assert_eq!(headers.len(), 3);
    assert_eq!(headers[0].get_aria("sort"), Some("none"));
    assert_eq!(headers[2].get_aria("sort"), None);
    assert_eq!(headers[2].inner_text(), "Notes");
    assert!(headers[1].has_class("table__cell--right"));

    assert_eq!(row_keys(&root), vec!["rust", "go", "zig"]);
    assert_eq!(find_by_tag(&root, "td").len(), 9);
}

#[test]
fn test_long_cells_are_truncated_with_title() {
    let registry = HandlerRegistry::new();
    let state = TableState::new();
    let root = Table::new(courses())
        .columns(columns())
        .state(&state)
        .build(&registry, &WidgetHandlers::new());

    let row = find_element(&root, "table-row-go").unwrap();
    let title_cell = &row.child_elements()[0];
    assert_eq!(title_cell.inner_text(), "go for go…");
    assert_eq!(title_cell.get_attr("title"), Some("go for gophers"));

    let students_cell = &row.child_elements()[1];
    assert_eq!(students_cell.get_attr("title"), None);
}

#[test]
fn test_header_click_cycles_sort() {
    let registry = HandlerRegistry::new();
    let state = TableState::new();
    let on_sort = Calls::new();
    let handlers = handlers(&[("on_sort", &on_sort)]);
    let build = || {
        Table::new(courses())
            .columns(columns())
            .state(&state)
            .build(&registry, &handlers)
    };
    build();

    registry.dispatch("table-sort-students", "on_click", EventData::None);
    let root = build();
    assert_eq!(row_keys(&root), vec!["go", "zig", "rust"]);
    let header = find_by_tag(&root, "th")[1];
    assert_eq!(header.get_aria("sort"), Some("ascending"));
    assert!(header.inner_text().ends_with('▲'));

    registry.dispatch("table-sort-students", "on_click", EventData::None);
    let root = build();
    assert_eq!(row_keys(&root), vec!["rust", "zig", "go"]);

    registry.dispatch("table-sort-students", "on_click", EventData::None);
    let root = build();
    assert_eq!(row_keys(&root), vec!["rust", "go", "zig"]);

    assert_eq!(
        on_sort.events(),
        vec![
            EventData::Sort {
                column: "students".into(),
                direction: Some(SortDirection::Ascending)
            },
            EventData::Sort {
                column: "students".into(),
                direction: Some(SortDirection::Descending)
            },
            EventData::Sort {
                column: "students".into(),
                direction: None
            },
        ]
    );
}

#[test]
fn test_controlled_sort_is_not_changed_by_clicks() {
    let registry = HandlerRegistry::new();
    let state = TableState::new();
    let on_sort = Calls::new();
    let handlers = handlers(&[("on_sort", &on_sort)]);
    let fixed = Some(SortState::new("title", SortDirection::Ascending));
    let build = || {
        Table::new(courses())
            .columns(columns())
            .sort(fixed.clone())
            .state(&state)
            .build(&registry, &handlers)
    };
    build();

    registry.dispatch("table-sort-title", "on_click", EventData::None);
    let root = build();

    assert_eq!(row_keys(&root), vec!["go", "rust", "zig"]);
    assert_eq!(
        on_sort.last(),
        Some(EventData::Sort {
            column: "title".into(),
            direction: Some(SortDirection::Descending)
        })
    );
}

#[test]
fn test_initial_sort_from_state() {
    let registry = HandlerRegistry::new();
    let state = TableState::sorted_by("students", SortDirection::Descending);
    let root = Table::new(courses())
        .columns(columns())
        .state(&state)
        .build(&registry, &WidgetHandlers::new());
    assert_eq!(row_keys(&root), vec!["rust", "zig", "go"]);
}

#[test]
fn test_row_click() {
    let registry = HandlerRegistry::new();
    let state = TableState::new();
    let on_row_click = Calls::new();
    let root = Table::new(courses())
        .columns(columns())
        .state(&state)
        .build(&registry, &handlers(&[("on_row_click", &on_row_click)]));

    assert!(find_element(&root, "table-row-zig")
        .unwrap()
        .has_class("table__row--clickable"));
    registry.dispatch("table-row-zig", "on_click", EventData::None);
    assert_eq!(on_row_click.events(), vec![EventData::Row("zig".into())]);
}

#[test]
fn test_rows_not_clickable_without_handler() {
    let registry = HandlerRegistry::new();
    let state = TableState::new();
    let root = Table::new(courses())
        .columns(columns())
        .state(&state)
        .build(&registry, &WidgetHandlers::new());

    assert!(!find_element(&root, "table-row-zig")
        .unwrap()
        .has_class("table__row--clickable"));
    assert!(!registry.contains("table-row-zig", "on_click"));
}

#[test]
fn test_empty_table() {
    let registry = HandlerRegistry::new();
    let state = TableState::new();
    let root = Table::new(Vec::<Course>::new())
        .columns(columns())
        .state(&state)
        .build(&registry, &WidgetHandlers::new());

    let empty = find_by_class(&root, "table__empty");
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].inner_text(), "No data available");
    assert_eq!(find_by_tag(&root, "td")[0].get_attr("colspan"), Some("3"));

    let custom = Table::new(Vec::<Course>::new())
        .columns(columns())
        .empty_message("No courses yet")
        .state(&state)
        .build(&registry, &WidgetHandlers::new());
    assert_eq!(find_by_class(&custom, "table__empty")[0].inner_text(), "No courses yet");

    let rendered = Table::new(Vec::<Course>::new())
        .empty_renderer(renderer(|_: &()| Ok(Element::text("Nothing here").class("blank-slate"))))
        .state(&state)
        .build(&registry, &WidgetHandlers::new());
    assert_eq!(find_by_class(&rendered, "blank-slate").len(), 1);
    assert_eq!(find_by_tag(&rendered, "td")[0].get_attr("colspan"), Some("1"));
}
