//! Section title: bold label with a gray rule filling the rest of the line.

use crate::flow::Element;
use crate::geometry::{spacing, Rect, Size};
use crate::style::{palette, TextStyle};
use crate::surface::Surface;
use crate::text::Paragraph;

const RULE_HEIGHT: f64 = 2.0;

pub struct SectionTitle {
    text: String,
    style: TextStyle,
    wrapped: Option<Paragraph>,
}

impl SectionTitle {
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

impl Element for SectionTitle {
    fn measure(&mut self, max_width: f64, _max_height: f64) -> Size {
        let para = Paragraph::wrap(&self.text, &self.style, max_width);
        let size = Size::new(max_width, para.height());
        self.wrapped = Some(para);
        size
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let Some(para) = &self.wrapped else {
            return;
        };
        para.render(surface, x, y);

        // Rule from the end of the label to the right edge, centered on
        // the first line.
        let rule_x = x + para.max_line_width() + spacing::PADDING;
        let rule_width = para.size().width - para.max_line_width() - spacing::PADDING;
        let rule_y = y + self.style.leading / 2.0 - RULE_HEIGHT / 2.0;
        surface.fill_rect(
            Rect::new(rule_x, rule_y, rule_width, RULE_HEIGHT),
            palette::GRAY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSheet;
    use crate::surface::DrawOp;

    #[test]
    fn test_title_draws_label_and_rule() {
        let styles = StyleSheet::new();
        let mut title = SectionTitle::new("Identification", styles.title.clone());
        let size = title.measure(400.0, 100.0);
        assert!(size.height > 0.0);

        let mut s = Surface::new(400.0, 100.0, false);
        title.render(&mut s, 0.0, 0.0);
        assert_eq!(s.text_content(), vec!["Identification"]);
        let rule = s
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Rect { rect, color } if *color == palette::GRAY => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert!(rule.x > 0.0);
        assert!((rule.right() - 400.0).abs() < 1e-9);
    }
}
