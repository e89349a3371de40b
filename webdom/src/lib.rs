pub mod element;
pub mod event;
pub mod layout;
pub mod render;
pub mod text;

pub use element::{find_all, find_by_class, find_by_tag, find_element, Content, Element};
pub use event::{Event, Key, Modifiers, WINDOW_TARGET};
pub use layout::{Point, Rect, Viewport};
pub use render::{to_html, to_html_pretty};
