//! Prelude module for convenient imports.
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```

// Core types
pub use crate::config::TrellisConfig;
pub use crate::controlled::Controlled;
pub use crate::error::{ConfigError, RenderError};
pub use crate::handler_context::{
    handler, EventData, Handler, HandlerContext, HandlerRegistry, WidgetHandlers,
};
pub use crate::render::{renderer, Renderer};
pub use crate::state::State;
pub use crate::toggle_set::ToggleSet;
pub use crate::types::{Align, SortDirection, Variant, WidgetSize};

// Widgets
pub use crate::widgets::breadcrumbs::{BreadcrumbItem, Breadcrumbs};
pub use crate::widgets::course::{
    CourseFilterBar, CourseFilterBarState, CourseLesson, CourseNavigation, CourseProgress,
    CourseSection, CourseSidebar, CourseSidebarState, FilterOption, LessonLink, SortOption,
};
pub use crate::widgets::navbar::{NavBrand, NavItem, Navbar, NavbarState};
pub use crate::widgets::pagination::Pagination;
pub use crate::widgets::pricing_card::{BillingPeriod, PlanFeature, PricingCard, PricingPlan};
pub use crate::widgets::search::{
    MatchMode, SearchBox, SearchController, SearchFilter, SearchSuggestion, SuggestionKind,
};
pub use crate::widgets::table::{SortState, Table, TableColumn, TableRow, TableState};
pub use crate::widgets::tooltip::{
    Measure, Placement, StaticMeasure, Tooltip, TooltipController,
};

// Re-export webdom types used in widget signatures
pub use webdom::{Element, Key, Point, Rect, Viewport};
