//! Built-in widgets.
//!
//! Every widget is a builder that produces a `webdom::Element`:
//!
//! ```ignore
//! let nav = Pagination::new()
//!     .current(3)
//!     .total(10)
//!     .build(&registry, &handlers);
//! ```
//!
//! `build` registers handlers for the interactive elements it renders in the
//! `HandlerRegistry`, keyed by element id and event name. Registration goes
//! through a `RegistryScope` named after the widget's root id, so each build
//! replaces the handlers of the previous one. Callbacks supplied
//! by the caller in `WidgetHandlers` are invoked from those handlers with an
//! `EventData` payload. Widgets that keep local state between builds take a
//! state or controller reference first (`.state(&s)` / `.controller(&c)`).

pub mod breadcrumbs;
pub mod course;
pub mod navbar;
pub mod pagination;
pub mod pricing_card;
pub mod search;
pub mod table;
pub mod tooltip;

pub use breadcrumbs::{BreadcrumbItem, Breadcrumbs};
pub use course::{
    CourseFilterBar, CourseFilterBarState, CourseLesson, CourseNavigation, CourseProgress,
    CourseSection, CourseSidebar, CourseSidebarState, FilterOption, LessonLink, SortOption,
};
pub use navbar::{NavBrand, NavItem, Navbar, NavbarState};
pub use pagination::Pagination;
pub use pricing_card::{BillingPeriod, PlanFeature, PricingCard, PricingPlan};
pub use search::{SearchBox, SearchController, SearchFilter, SearchSuggestion};
pub use table::{SortState, Table, TableColumn, TableRow, TableState};
pub use tooltip::{Placement, Tooltip, TooltipController};
