//! Paragraph wrapping.
//!
//! The paragraph primitive the rest of the engine builds on: given a style
//! and a maximum width it greedily breaks on whitespace, yielding a block
//! with a deterministic height and the widest rendered line. Alignment is
//! applied at render time against the wrap width.

use crate::geometry::Size;
use crate::style::{Align, TextStyle};
use crate::surface::Surface;

/// Fraction of the font size sitting above the baseline. Matches the
/// Helvetica ascender closely enough for single-style lines.
const ASCENT_RATIO: f64 = 0.8;

/// A wrapped block of text.
#[derive(Debug, Clone)]
pub struct Paragraph {
    style: TextStyle,
    lines: Vec<Line>,
    wrap_width: f64,
    max_line_width: f64,
}

#[derive(Debug, Clone)]
struct Line {
    text: String,
    width: f64,
}

impl Paragraph {
    /// Wrap `text` to `max_width` under `style`.
    pub fn wrap(text: &str, style: &TextStyle, max_width: f64) -> Self {
        let mut lines: Vec<Line> = Vec::new();

        for raw_line in text.split('\n') {
            let words: Vec<&str> = raw_line.split_whitespace().collect();
            if words.is_empty() {
                lines.push(Line {
                    text: String::new(),
                    width: 0.0,
                });
                continue;
            }

            let mut current = String::new();
            let mut current_width = 0.0;
            for word in words {
                let word_width = style.font.measure_string(word, style.size);
                let space_width = style.font.char_width(' ', style.size);
                let candidate_width = if current.is_empty() {
                    word_width
                } else {
                    current_width + space_width + word_width
                };

                if candidate_width <= max_width || current.is_empty() {
                    if !current.is_empty() {
                        current.push(' ');
                        current_width += space_width;
                    }
                    current.push_str(word);
                    current_width += word_width;
                } else {
                    lines.push(Line {
                        text: std::mem::take(&mut current),
                        width: current_width,
                    });
                    current.push_str(word);
                    current_width = word_width;
                }
            }
            lines.push(Line {
                text: current,
                width: current_width,
            });
        }

        let max_line_width = lines.iter().map(|l| l.width).fold(0.0, f64::max);

        Self {
            style: style.clone(),
            lines,
            wrap_width: max_width,
            max_line_width,
        }
    }

    /// Block height: line count times leading. Spacing before/after is the
    /// caller's concern (frames insert it between siblings).
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.style.leading
    }

    /// Width of the widest rendered line.
    pub fn max_line_width(&self) -> f64 {
        self.max_line_width
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn size(&self) -> Size {
        Size::new(self.wrap_width, self.height())
    }

    /// Draw all lines with the block's top-left corner at (x, y).
    pub fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        for (i, line) in self.lines.iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            let line_x = match self.style.align {
                Align::Left => x,
                Align::Center => x + (self.wrap_width - line.width) / 2.0,
                Align::Right => x + self.wrap_width - line.width,
            };
            let baseline = y + i as f64 * self.style.leading + self.style.size * ASCENT_RATIO;
            surface.draw_text_line(
                line_x,
                baseline,
                &line.text,
                self.style.font,
                self.style.size,
                self.style.color,
            );
        }
    }
}
