//! Tooltip placement arithmetic and viewport flipping.
//!
//! Everything here is pure: rectangles are snapshots taken by the caller, who
//! re-runs the computation on scroll and resize.

use serde::{Deserialize, Serialize};
use webdom::{Point, Rect, Viewport};

/// Distance of the arrow from the aligned edge for corner placements.
pub const ARROW_EDGE_OFFSET: f32 = 16.0;

/// Side of the trigger the panel is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Alignment of the panel along its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Center,
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    Top,
    TopStart,
    TopEnd,
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
    Right,
    RightStart,
    RightEnd,
}

impl Placement {
    pub const ALL: [Placement; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
    ];

    /// Fallbacks tried, in order, after the requested placement.
    pub const FALLBACKS: [Placement; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
        }
    }

    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => Alignment::Center,
            Self::TopStart | Self::BottomStart | Self::LeftStart | Self::RightStart => {
                Alignment::Start
            }
            Self::TopEnd | Self::BottomEnd | Self::LeftEnd | Self::RightEnd => Alignment::End,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved panel position.
///
/// `x`/`y` is the panel's top-left corner in viewport pixels; the arrow
/// position is relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionData {
    pub x: f32,
    pub y: f32,
    pub placement: Placement,
    pub arrow_x: f32,
    pub arrow_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    /// Gap between trigger and panel.
    pub offset: f32,
    /// Shift along the side for start/end placements.
    pub skidding: f32,
    /// Try fallback placements when the requested one overflows.
    pub flip: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            offset: 8.0,
            skidding: 0.0,
            flip: true,
        }
    }
}

/// Top-left corner of the panel for `placement`, ignoring the viewport.
pub fn place(trigger: Rect, content: Rect, placement: Placement, options: &PositionOptions) -> Point {
    let PositionOptions {
        offset, skidding, ..
    } = *options;

    match placement.side() {
        Side::Top | Side::Bottom => {
            let y = if placement.side() == Side::Top {
                trigger.y - content.height - offset
            } else {
                trigger.bottom() + offset
            };
            let x = match placement.alignment() {
                Alignment::Center => trigger.x + trigger.width / 2.0 - content.width / 2.0,
                Alignment::Start => trigger.x + skidding,
                Alignment::End => trigger.right() - content.width - skidding,
            };
            Point::new(x, y)
        }
        Side::Left | Side::Right => {
            let x = if placement.side() == Side::Left {
                trigger.x - content.width - offset
            } else {
                trigger.right() + offset
            };
            let y = match placement.alignment() {
                Alignment::Center => trigger.y + trigger.height / 2.0 - content.height / 2.0,
                Alignment::Start => trigger.y + skidding,
                Alignment::End => trigger.bottom() - content.height - skidding,
            };
            Point::new(x, y)
        }
    }
}

/// Arrow position relative to the panel, on the edge facing the trigger.
pub fn arrow_position(content: Rect, placement: Placement) -> Point {
    let along = |length: f32| match placement.alignment() {
        Alignment::Center => length / 2.0,
        Alignment::Start => ARROW_EDGE_OFFSET,
        Alignment::End => length - ARROW_EDGE_OFFSET,
    };

    match placement.side() {
        Side::Top => Point::new(along(content.width), content.height),
        Side::Bottom => Point::new(along(content.width), 0.0),
        Side::Left => Point::new(content.width, along(content.height)),
        Side::Right => Point::new(0.0, along(content.height)),
    }
}

/// Candidate placements in the order they are tried. Duplicates are skipped.
pub fn candidates(requested: Placement, flip: bool) -> Vec<Placement> {
    let mut out = vec![requested];
    if flip {
        for fallback in Placement::FALLBACKS {
            if !out.contains(&fallback) {
                out.push(fallback);
            }
        }
    }
    out
}

/// Position the panel, preferring `requested` and flipping when it overflows.
///
/// Returns the first candidate that lies fully inside the viewport. When
/// nothing fits (or `flip` is off and the requested placement overflows) the
/// requested placement is returned as computed, possibly off-screen.
pub fn compute_position(
    trigger: Rect,
    content: Rect,
    requested: Placement,
    options: &PositionOptions,
    viewport: Viewport,
) -> PositionData {
    let resolve = |placement: Placement| {
        let origin = place(trigger, content, placement, options);
        let arrow = arrow_position(content, placement);
        PositionData {
            x: origin.x,
            y: origin.y,
            placement,
            arrow_x: arrow.x,
            arrow_y: arrow.y,
        }
    };

    candidates(requested, options.flip)
        .into_iter()
        .map(resolve)
        .find(|pos| content.at(pos.x, pos.y).fits_within(viewport))
        .unwrap_or_else(|| resolve(requested))
}

/// Follow-cursor position: the panel sits `offset` below and right of the
/// pointer, pushed back inside the viewport. Never negative.
///
/// No placement search happens; the result reports `bottom-start` and the arrow
/// at the panel's origin.
pub fn follow_cursor_position(
    pointer: Point,
    content: Rect,
    offset: f32,
    viewport: Viewport,
) -> PositionData {
    let clamp = |value: f32, size: f32, limit: f32| value.min(limit - size).max(0.0);

    PositionData {
        x: clamp(pointer.x + offset, content.width, viewport.width),
        y: clamp(pointer.y + offset, content.height, viewport.height),
        placement: Placement::BottomStart,
        arrow_x: 0.0,
        arrow_y: 0.0,
    }
}
