//! Page geometry: units, rectangles, edge values, and the spacing table.
//!
//! Everything is measured in PDF points (1/72 inch). Physical dimensions
//! come in as millimetres and are converted once, here.

use serde::{Deserialize, Serialize};

/// Convert millimetres to points.
pub const fn mm(v: f64) -> f64 {
    v * 72.0 / 25.4
}

/// ISO A4 in points (210 × 297 mm).
pub const A4_WIDTH: f64 = 595.28;
pub const A4_HEIGHT: f64 = 841.89;

/// The fixed spacing table used throughout the report layout.
pub mod spacing {
    use super::mm;

    /// Outer margin kept clear on every page edge.
    pub const SAFE_MARGIN: f64 = mm(4.0);
    /// Interior padding applied inside frames and cards.
    pub const PADDING: f64 = 4.0;
    /// Vertical gap between stacked primitives.
    pub const GAP: f64 = 10.0;
    /// Height of the page header band.
    pub const HEADER_HEIGHT: f64 = mm(24.0);
}

/// An axis-aligned rectangle. Origin is the top-left corner; y grows
/// downward (flipped to PDF coordinates only at serialization time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink this rect by edge insets.
    pub fn inset(&self, edges: Edges) -> Rect {
        Rect {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.horizontal()).max(0.0),
            height: (self.height - edges.vertical()).max(0.0),
        }
    }
}

/// Edge values (top, right, bottom, left) used for margins and padding.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// A measured element size, as returned by `Element::measure`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
