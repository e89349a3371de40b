//! The course catalog page: every widget wired to one handler registry.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use trellis::prelude::*;
use webdom::Event;

use crate::catalog::Catalog;

const TOTAL_PAGES: u32 = 12;
const SEARCH_ID: &str = "course-search";
const TABLE_ID: &str = "catalog";
const PAGINATION_ID: &str = "catalog-pages";
const HELP_TRIGGER_ID: &str = "sync-help";

/// Trigger sits in the top-right corner so a top placement has to flip.
const HELP_TRIGGER: Rect = Rect::new(700.0, 4.0, 24.0, 24.0);
const HELP_PANEL: Rect = Rect::from_size(220.0, 48.0);
const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

pub struct CoursePage {
    config: TrellisConfig,
    catalog: Catalog,
    registry: HandlerRegistry,
    handlers: WidgetHandlers,
    current_page: State<u32>,
    navbar: NavbarState,
    search: SearchController,
    table: TableState,
    filters: CourseFilterBarState,
    sidebar: CourseSidebarState,
    measure: StaticMeasure,
    help: TooltipController,
}

/// A callback that only records the event in the log.
fn logged(name: &'static str) -> Handler {
    handler(move |cx| info!("{name} from {}: {:?}", cx.element_id(), cx.event()))
}

impl CoursePage {
    pub fn new(config: TrellisConfig, catalog: Catalog) -> Self {
        let registry = HandlerRegistry::new();
        let current_page = State::new(1);

        let mut handlers = WidgetHandlers::new();
        for name in [
            "on_navigate",
            "on_toggle",
            "on_menu_toggle",
            "on_search",
            "on_submit",
            "on_select",
            "on_filter_change",
            "on_clear",
            "on_sort",
            "on_sort_change",
            "on_row_click",
            "on_section_toggle",
            "on_lesson_select",
            "on_visibility_change",
        ] {
            handlers.insert(name, logged(name));
        }
        let page = current_page.clone();
        handlers.insert(
            "on_page_change",
            handler(move |cx| {
                if let Some(next) = cx.event().page() {
                    info!("page changed to {next}");
                    page.set(next);
                }
            }),
        );

        let measure = StaticMeasure::new(HELP_TRIGGER, HELP_PANEL, VIEWPORT);
        let help = TooltipController::with_id("sync-help-tip", &registry, Arc::new(measure.clone()));
        let search = SearchController::with_config(&config.search);

        Self {
            config,
            catalog,
            registry,
            handlers,
            current_page,
            navbar: NavbarState::new(),
            search,
            table: TableState::sorted_by("students", SortDirection::Descending),
            filters: CourseFilterBarState::new(),
            sidebar: CourseSidebarState::new(),
            measure,
            help,
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn render(&self) -> Element {
        let registry = &self.registry;
        let handlers = &self.handlers;
        let catalog = &self.catalog;

        let navbar = Navbar::new()
            .brand(catalog.brand.clone())
            .items(catalog.nav.clone())
            .active("courses")
            .sticky(true)
            .state(&self.navbar)
            .build(registry, handlers);

        let trail = Breadcrumbs::new()
            .with_config(&self.config.breadcrumbs)
            .items(catalog.trail.clone())
            .build(registry, handlers);

        let search = SearchBox::new()
            .id(SEARCH_ID)
            .label("Search courses")
            .placeholder("Try \"async\" or \"parsers\"")
            .suggestions(catalog.suggestions())
            .filters(catalog.filters.clone())
            .controller(&self.search)
            .build(registry, handlers);

        let filter_bar = CourseFilterBar::new()
            .categories(catalog.categories.clone())
            .levels(catalog.levels.clone())
            .sort_options(catalog.sort_options.clone())
            .result_count(catalog.courses.len())
            .state(&self.filters)
            .build(registry, handlers);

        let table = Table::new(catalog.courses.clone())
            .id(TABLE_ID)
            .caption("All courses")
            .columns(vec![
                TableColumn::new("title", "Course").sortable().max_width(28),
                TableColumn::new("level", "Level"),
                TableColumn::new("students", "Students")
                    .sortable()
                    .align(Align::Right),
            ])
            .striped(true)
            .state(&self.table)
            .build(registry, handlers);

        let pagination = Pagination::new()
            .with_config(&self.config.pagination)
            .id(PAGINATION_ID)
            .current(self.current_page.get())
            .total(TOTAL_PAGES)
            .show_summary(true)
            .build(registry, handlers);

        let help = Tooltip::new()
            .with_config(&self.config.tooltip)
            .placement(Placement::Top)
            .text("Progress syncs across all your devices")
            .trigger(Element::button("?").id(HELP_TRIGGER_ID))
            .controller(&self.help)
            .build(registry, handlers);

        let (done, total) = catalog.lesson_count();
        let progress = CourseProgress::new()
            .label("Course progress")
            .completed(done)
            .total(total)
            .build();

        let sidebar = CourseSidebar::new()
            .title("Async Rust in Practice")
            .sections(catalog.syllabus.clone())
            .active_lesson("select")
            .state(&self.sidebar)
            .build(registry, handlers);

        let lesson_nav = CourseNavigation::new()
            .previous(LessonLink::new("spawning", "Spawning tasks", "/lessons/spawning"))
            .next(LessonLink::new("channels", "Channels", "/lessons/channels"))
            .position(4, total)
            .build(registry, handlers);

        let plans = Element::new("section")
            .class("pricing")
            .children(catalog.plans.iter().map(|plan| {
                PricingCard::new()
                    .plan(plan.clone())
                    .build(registry, handlers)
            }));

        Element::new("main")
            .id("course-page")
            .child(navbar)
            .child(trail)
            .child(
                Element::new("section")
                    .class("catalog")
                    .child(search)
                    .child(filter_bar)
                    .child(table)
                    .child(pagination),
            )
            .child(
                Element::new("aside")
                    .class("lesson-panel")
                    .child(progress)
                    .child(help)
                    .child(sidebar)
                    .child(lesson_nav),
            )
            .child(plans)
    }

    /// Drive the page the way a visitor would, re-rendering after each step.
    pub async fn interact(&self) {
        self.render();

        info!("typing into the search box");
        for text in ["a", "as", "asy", "async"] {
            self.dispatch(Event::Input {
                target: format!("{SEARCH_ID}-input"),
                value: text.into(),
            });
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        tokio::time::sleep(self.config.search.debounce() + Duration::from_millis(20)).await;
        let results = self.search.results();
        info!("search committed with {} results", results.len());
        self.render();

        self.click(&format!("{TABLE_ID}-sort-title"));
        self.click(&format!("{PAGINATION_ID}-page-2"));
        self.render();

        info!("focusing the help trigger");
        self.dispatch(Event::Focus {
            target: HELP_TRIGGER_ID.into(),
        });
        tokio::time::sleep(self.config.tooltip.show_delay() + Duration::from_millis(20)).await;
        if let Some(position) = self.help.position() {
            info!(
                "help tooltip placed {} at ({}, {})",
                position.placement, position.x, position.y
            );
        }

        // Scrolling moves the trigger down the viewport, away from the top edge.
        self.measure.set_trigger(HELP_TRIGGER.at(HELP_TRIGGER.x, 240.0));
        self.dispatch(Event::Scroll { x: 0.0, y: 236.0 });
        if let Some(position) = self.help.position() {
            info!("after scroll the tooltip sits {}", position.placement);
        }
    }

    fn click(&self, target: &str) {
        self.dispatch(Event::Click {
            target: target.into(),
        });
    }

    fn dispatch(&self, event: Event) {
        if !self.registry.dispatch_event(&event) {
            debug!("nothing handled {event:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webdom::{find_by_class, find_element};

    fn page() -> CoursePage {
        CoursePage::new(TrellisConfig::default(), Catalog::bundled().unwrap())
    }

    #[test]
    fn test_render_contains_every_widget() {
        let page = page();
        let root = page.render();
        assert!(find_element(&root, "navbar").is_some());
        assert!(find_element(&root, "course-search").is_some());
        assert!(find_element(&root, TABLE_ID).is_some());
        assert!(find_element(&root, PAGINATION_ID).is_some());
        assert_eq!(find_by_class(&root, "pricing-card").len(), 3);
        assert!(!page.registry().is_empty());
    }

    #[test]
    fn test_page_change_rerenders_pagination() {
        let page = page();
        page.render();
        page.click(&format!("{PAGINATION_ID}-page-2"));
        let root = page.render();
        let current = find_element(&root, &format!("{PAGINATION_ID}-page-2")).unwrap();
        assert_eq!(current.get_aria("current"), Some("page"));
    }

    #[test]
    fn test_previous_is_inert_after_returning_to_first_page() {
        let page = page();
        page.render();
        page.click(&format!("{PAGINATION_ID}-page-2"));
        page.render();
        page.click(&format!("{PAGINATION_ID}-prev"));
        page.render();

        let prev = Event::Click {
            target: format!("{PAGINATION_ID}-prev"),
        };
        assert!(!page.registry().dispatch_event(&prev));
        let first = Event::Click {
            target: format!("{PAGINATION_ID}-page-1"),
        };
        assert!(!page.registry().dispatch_event(&first));
    }
}
