//! The recording draw surface.
//!
//! Layout renders into a `Surface` per page: a flat list of draw
//! operations in top-down page coordinates. The PDF serializer consumes
//! the recorded pages afterwards; nothing here knows about PDF syntax.
//! Recording also makes the discovery pagination pass cheap to discard
//! and gives tests something concrete to assert against.

use crate::font::StandardFont;
use crate::geometry::Rect;
use crate::style::Color;

/// A single recorded drawing operation.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// Axis-aligned filled rectangle.
    Rect { rect: Rect, color: Color },
    /// Filled polygon, points in page coordinates.
    Polygon { points: Vec<(f64, f64)>, color: Color },
    /// One line of text. `y` is the baseline position.
    TextLine {
        x: f64,
        y: f64,
        text: String,
        font: StandardFont,
        size: f64,
        color: Color,
    },
    /// Debug boundary stroke (frame visualization).
    Boundary { rect: Rect },
}

/// One page's worth of recorded operations.
#[derive(Debug, Clone)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    ops: Vec<DrawOp>,
    debug_boundaries: bool,
    overflow_events: u32,
}

impl Surface {
    pub fn new(width: f64, height: f64, debug_boundaries: bool) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            debug_boundaries,
            overflow_events: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Whether frames should stroke their boundaries.
    pub fn debug_boundaries(&self) -> bool {
        self.debug_boundaries
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.a <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.ops.push(DrawOp::Rect { rect, color });
    }

    pub fn fill_polygon(&mut self, points: Vec<(f64, f64)>, color: Color) {
        if color.a <= 0.0 || points.len() < 3 {
            return;
        }
        self.ops.push(DrawOp::Polygon { points, color });
    }

    pub fn draw_text_line(
        &mut self,
        x: f64,
        baseline_y: f64,
        text: &str,
        font: StandardFont,
        size: f64,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::TextLine {
            x,
            y: baseline_y,
            text: text.to_string(),
            font,
            size,
            color,
        });
    }

    pub fn stroke_boundary(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Boundary { rect });
    }

    /// Record that content was drawn past a frame boundary on this page.
    pub fn note_overflow(&mut self) {
        self.overflow_events += 1;
    }

    pub fn overflow_events(&self) -> u32 {
        self.overflow_events
    }

    /// Collect all text on the page, line by line, for assertions.
    pub fn text_content(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::TextLine { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::palette;

    #[test]
    fn test_zero_alpha_rect_is_dropped() {
        let mut s = Surface::new(100.0, 100.0, false);
        s.fill_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            palette::GRAY.with_alpha(0.0),
        );
        assert!(s.ops().is_empty());
    }

    #[test]
    fn test_empty_text_is_dropped() {
        let mut s = Surface::new(100.0, 100.0, false);
        s.draw_text_line(0.0, 10.0, "", StandardFont::Helvetica, 9.0, palette::BLACK);
        assert!(s.ops().is_empty());
    }

    #[test]
    fn test_text_content() {
        let mut s = Surface::new(100.0, 100.0, false);
        s.draw_text_line(0.0, 10.0, "a", StandardFont::Helvetica, 9.0, palette::BLACK);
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), palette::GRAY);
        s.draw_text_line(0.0, 20.0, "b", StandardFont::Helvetica, 9.0, palette::BLACK);
        assert_eq!(s.text_content(), vec!["a", "b"]);
    }
}
