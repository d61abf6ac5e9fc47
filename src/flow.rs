//! The flow model: measurable elements and frames.
//!
//! Everything placed onto a page implements [`Element`]: measure within a
//! width/height budget, then render at a position. Elements that know how
//! to break across pages additionally implement [`Element::split`]; the
//! default signals "not splittable" so the pagination engine can tell the
//! two kinds apart.
//!
//! A [`Frame`] is a rectangle that lays a sequence of elements out
//! top-to-bottom inside its padded interior. Frames never fail: content
//! that exceeds the interior height is drawn past the boundary, and the
//! event is logged and counted on the surface so strict builds can turn
//! it into an error.

use crate::geometry::{Edges, Rect, Size};
use crate::style::TextStyle;
use crate::surface::Surface;
use crate::text::Paragraph;
use tracing::warn;

/// Height slack tolerated before a frame counts as overflowed.
pub const EPSILON: f64 = 0.01;

/// Result of asking an element to split at a page boundary.
pub enum Split {
    /// The element does not support splitting.
    Unsupported,
    /// Nothing fits in the remaining height; place the whole element on
    /// the next page.
    Defer,
    /// `fitted` fills the remaining height; `remainder` flows on.
    Parts {
        fitted: Vec<Box<dyn Element>>,
        remainder: Vec<Box<dyn Element>>,
    },
}

/// A content unit with a measurement and rendering contract.
///
/// `measure` may cache wrapped text and child primitives on `self`; it is
/// called exactly once before each `render` and must be re-run whenever
/// the available width changes.
pub trait Element {
    fn measure(&mut self, max_width: f64, max_height: f64) -> Size;

    /// Draw at (x, y) = the element's top-left corner. Requires a prior
    /// `measure` with the same width.
    fn render(&self, surface: &mut Surface, x: f64, y: f64);

    /// Break this element so that a prefix fits within `max_height`.
    fn split(&mut self, _max_width: f64, _max_height: f64) -> Split {
        Split::Unsupported
    }

    /// Spacers are dropped at the top of a fresh page.
    fn is_spacer(&self) -> bool {
        false
    }
}

/// A zero-content element consuming fixed vertical space.
pub struct Spacer {
    height: f64,
}

impl Spacer {
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    pub fn boxed(height: f64) -> Box<dyn Element> {
        Box::new(Self::new(height))
    }
}

impl Element for Spacer {
    fn measure(&mut self, max_width: f64, _max_height: f64) -> Size {
        Size::new(max_width, self.height)
    }

    fn render(&self, _surface: &mut Surface, _x: f64, _y: f64) {}

    fn is_spacer(&self) -> bool {
        true
    }
}

/// A paragraph as a flow element.
pub struct Para {
    text: String,
    style: TextStyle,
    wrapped: Option<Paragraph>,
}

impl Para {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            wrapped: None,
        }
    }

    pub fn boxed(text: impl Into<String>, style: TextStyle) -> Box<dyn Element> {
        Box::new(Self::new(text, style))
    }
}

impl Element for Para {
    fn measure(&mut self, max_width: f64, _max_height: f64) -> Size {
        let para = Paragraph::wrap(&self.text, &self.style, max_width);
        let size = Size::new(max_width, para.height());
        self.wrapped = Some(para);
        size
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        debug_assert!(self.wrapped.is_some(), "Para rendered before measure");
        if let Some(para) = &self.wrapped {
            para.render(surface, x, y);
        }
    }
}

/// A rectangular sub-area of a page that allocates vertical space to a
/// sequence of elements.
#[derive(Debug, Clone)]
pub struct Frame {
    rect: Rect,
    padding: Edges,
}

impl Frame {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            padding: Edges::default(),
        }
    }

    pub fn with_padding(rect: Rect, padding: Edges) -> Self {
        Self { rect, padding }
    }

    /// The interior rectangle children are placed into.
    pub fn interior(&self) -> Rect {
        self.rect.inset(self.padding)
    }

    /// Lay the elements out top-to-bottom; vertical spacing comes from
    /// explicit [`Spacer`]s in the sequence. Returns the consumed height
    /// (spacers included).
    ///
    /// Overflow is non-fatal: children past the interior height are drawn
    /// anyway, with a warning and an overflow mark on the surface.
    pub fn add_from_list(
        &self,
        mut children: Vec<Box<dyn Element>>,
        surface: &mut Surface,
    ) -> f64 {
        let interior = self.interior();
        if surface.debug_boundaries() {
            surface.stroke_boundary(self.rect);
        }

        let mut cursor = interior.y;
        for child in children.iter_mut() {
            let remaining = interior.bottom() - cursor;
            let size = child.measure(interior.width, remaining.max(0.0));
            child.render(surface, interior.x, cursor);
            cursor += size.height;
        }

        let consumed = cursor - interior.y;
        if consumed > interior.height + EPSILON {
            warn!(
                consumed,
                capacity = interior.height,
                "frame overflow: content drawn past boundary"
            );
            surface.note_overflow();
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;

    fn body() -> TextStyle {
        TextStyle::new(StandardFont::Helvetica, 9.0)
    }

    #[test]
    fn test_spacer_measures_fixed_height() {
        let mut sp = Spacer::new(10.0);
        let size = sp.measure(100.0, 50.0);
        assert_eq!(size.height, 10.0);
        let mut s = Surface::new(100.0, 100.0, false);
        sp.render(&mut s, 0.0, 0.0);
        assert!(s.ops().is_empty());
    }

    #[test]
    fn test_frame_stacks_children() {
        let frame = Frame::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let mut s = Surface::new(200.0, 100.0, false);
        let consumed = frame.add_from_list(
            vec![
                Para::boxed("one", body()),
                Spacer::boxed(10.0),
                Para::boxed("two", body()),
            ],
            &mut s,
        );
        let line = 9.0 * 1.2;
        assert!((consumed - (line + 10.0 + line)).abs() < 1e-6);
        assert_eq!(s.overflow_events(), 0);
    }

    #[test]
    fn test_frame_overflow_is_nonfatal_but_counted() {
        let frame = Frame::new(Rect::new(0.0, 0.0, 200.0, 5.0));
        let mut s = Surface::new(200.0, 200.0, false);
        let consumed = frame.add_from_list(
            vec![Para::boxed("line", body()), Para::boxed("line", body())],
            &mut s,
        );
        assert!(consumed > 5.0);
        assert_eq!(s.overflow_events(), 1);
        // Both children were still drawn.
        assert_eq!(s.text_content().len(), 2);
    }

    #[test]
    fn test_frame_padding_offsets_children() {
        let frame = Frame::with_padding(
            Rect::new(10.0, 20.0, 100.0, 100.0),
            Edges::uniform(4.0),
        );
        let mut s = Surface::new(200.0, 200.0, false);
        frame.add_from_list(vec![Para::boxed("x", body())], &mut s);
        match &s.ops()[0] {
            crate::surface::DrawOp::TextLine { x, y, .. } => {
                assert!((x - 14.0).abs() < 1e-9);
                // baseline = top padding + ascent
                assert!(*y > 24.0);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_default_split_is_unsupported() {
        let mut p = Para::new("abc", body());
        assert!(matches!(p.split(100.0, 5.0), Split::Unsupported));
    }
}
