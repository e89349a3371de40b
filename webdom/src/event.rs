/// High-level events with element targeting, as delivered by the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Primary-button click or keyboard activation
    Click { target: String },
    /// Pointer entered the element
    PointerEnter { target: String },
    /// Pointer left the element
    PointerLeave { target: String },
    /// Pointer moved (for follow-cursor tracking)
    PointerMove {
        target: Option<String>,
        x: f32,
        y: f32,
    },
    /// Element gained focus
    Focus { target: String },
    /// Element lost focus
    Blur { target: String },
    /// Text field value changed
    Input { target: String, value: String },
    /// Key press, targeted at the focused element
    Key {
        target: String,
        key: Key,
        modifiers: Modifiers,
    },
    /// Page scrolled
    Scroll { x: f32, y: f32 },
    /// Viewport resized
    Resize { width: f32, height: f32 },
}

impl Event {
    /// Element the event is aimed at. Scroll and resize target the window.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Click { target }
            | Self::PointerEnter { target }
            | Self::PointerLeave { target }
            | Self::Focus { target }
            | Self::Blur { target }
            | Self::Input { target, .. }
            | Self::Key { target, .. } => Some(target),
            Self::PointerMove { target, .. } => target.as_deref(),
            Self::Scroll { .. } | Self::Resize { .. } => Some(WINDOW_TARGET),
        }
    }

    /// Handler name this event is dispatched under.
    pub fn handler_name(&self) -> &'static str {
        match self {
            Self::Click { .. } => "on_click",
            Self::PointerEnter { .. } => "on_pointer_enter",
            Self::PointerLeave { .. } => "on_pointer_leave",
            Self::PointerMove { .. } => "on_pointer_move",
            Self::Focus { .. } => "on_focus",
            Self::Blur { .. } => "on_blur",
            Self::Input { .. } => "on_input",
            Self::Key { .. } => "on_key",
            Self::Scroll { .. } => "on_scroll",
            Self::Resize { .. } => "on_resize",
        }
    }
}

/// Pseudo element id for page-level listeners (scroll, resize).
pub const WINDOW_TARGET: &str = "window";

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Self> {
        let parsed = match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Tab" => Self::Tab,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(parsed)
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}
