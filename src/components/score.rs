//! Score component: number block, segmented range bar with needle, and
//! the auxiliary text column.
//!
//! The chart column has a fixed width; the text column takes whatever
//! width remains. An invalid score (at or below the floor) swaps in the
//! not-valid display data and hides the needle.

use crate::flow::Element;
use crate::geometry::{mm, spacing, Rect, Size};
use crate::model::{ScoreData, ScoreRangeData};
use crate::style::{text_color_on, Align, StyleSheet, TextStyle};
use crate::surface::Surface;
use crate::text::Paragraph;

const CHART_WIDTH: f64 = mm(42.0);
const NUMBER_BLOCK_HEIGHT: f64 = mm(20.0);
const SEGMENT_HEIGHT: f64 = mm(1.5);
const CURRENT_SEGMENT_HEIGHT: f64 = mm(3.0);
const SEGMENT_GAP: f64 = 1.0;
const NEEDLE_WIDTH: f64 = 6.0;
const NEEDLE_HEIGHT: f64 = 5.0;
const SCORE_FONT_SIZE: f64 = 20.0;

struct Display {
    color: crate::style::Color,
    description: String,
    aux_value: String,
    sentence: String,
}

pub struct ScoreChart {
    data: ScoreData,
    styles: StyleSheet,
    measured: Option<Measured>,
}

struct Measured {
    ranges: Vec<ScoreRangeData>,
    current_index: Option<usize>,
    display: Display,
    score_text: Paragraph,
    description: Paragraph,
    aux_title: Paragraph,
    aux_value: Paragraph,
    sentence: Paragraph,
}

impl ScoreChart {
    pub fn new(data: ScoreData, styles: &StyleSheet) -> Self {
        Self {
            data,
            styles: styles.clone(),
            measured: None,
        }
    }

    pub fn boxed(data: ScoreData, styles: &StyleSheet) -> Box<dyn Element> {
        Box::new(Self::new(data, styles))
    }

    fn display(&self) -> Display {
        if self.data.is_score_valid() {
            if let Some(range) = self.data.current_range() {
                return Display {
                    color: range.color,
                    description: range.description.clone(),
                    aux_value: range.aux_value.clone(),
                    sentence: self
                        .data
                        .aux_template
                        .replace("{}", &range.aux_value.to_lowercase()),
                };
            }
        }
        let nv = &self.data.not_valid;
        Display {
            color: nv.color,
            description: nv.description.clone(),
            aux_value: nv.aux_value.clone(),
            sentence: nv.aux_template.clone(),
        }
    }

    fn chart_column_height(description: &Paragraph, caption: &TextStyle) -> f64 {
        NUMBER_BLOCK_HEIGHT
            + spacing::PADDING
            + NEEDLE_HEIGHT
            + CURRENT_SEGMENT_HEIGHT
            + spacing::PADDING
            + description.height()
            + caption.leading
    }
}

impl Element for ScoreChart {
    fn measure(&mut self, max_width: f64, _max_height: f64) -> Size {
        let ranges = self.data.sorted_ranges();
        let current_index = if self.data.is_score_valid() {
            ranges
                .iter()
                .position(|r| r.max_score >= self.data.score)
                .or_else(|| ranges.len().checked_sub(1))
        } else {
            None
        };
        let display = self.display();

        let score_style = TextStyle::new(
            crate::font::StandardFont::HelveticaBold,
            SCORE_FONT_SIZE,
        )
        .with_color(text_color_on(display.color))
        .with_align(Align::Center);
        let score_text = Paragraph::wrap(&self.data.score.to_string(), &score_style, CHART_WIDTH);

        let caption = self.styles.caption_70.clone();
        let description = Paragraph::wrap(&display.description, &caption, CHART_WIDTH);

        let text_width = max_width - CHART_WIDTH - spacing::GAP;
        let aux_title = Paragraph::wrap(&self.data.aux_title, &self.styles.body_bold, text_width);
        let chip_style = self
            .styles
            .body_bold
            .with_color(text_color_on(display.color));
        let aux_value = Paragraph::wrap(&display.aux_value, &chip_style, text_width);
        let sentence = Paragraph::wrap(&display.sentence, &self.styles.body, text_width);

        let chart_height = Self::chart_column_height(&description, &caption);
        let text_height = aux_title.height()
            + spacing::PADDING
            + aux_value.height()
            + 2.0 * spacing::PADDING
            + spacing::PADDING
            + sentence.height();
        let height = chart_height.max(text_height);

        self.measured = Some(Measured {
            ranges,
            current_index,
            display,
            score_text,
            description,
            aux_title,
            aux_value,
            sentence,
        });
        Size::new(max_width, height)
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let Some(m) = &self.measured else {
            return;
        };

        // Number block.
        let block = Rect::new(x, y, CHART_WIDTH, NUMBER_BLOCK_HEIGHT);
        surface.fill_rect(block, m.display.color);
        let score_y = y + (NUMBER_BLOCK_HEIGHT - m.score_text.height()) / 2.0;
        m.score_text.render(surface, x, score_y);

        // Segmented bar, bottom-aligned, with the current segment thicker
        // and the needle riding above it.
        let bar_top = y + NUMBER_BLOCK_HEIGHT + spacing::PADDING + NEEDLE_HEIGHT;
        let bar_bottom = bar_top + CURRENT_SEGMENT_HEIGHT;
        if !m.ranges.is_empty() {
            let count = m.ranges.len() as f64;
            let segment_width = (CHART_WIDTH - (count - 1.0) * SEGMENT_GAP) / count;
            for (i, range) in m.ranges.iter().enumerate() {
                let seg_height = if Some(i) == m.current_index {
                    CURRENT_SEGMENT_HEIGHT
                } else {
                    SEGMENT_HEIGHT
                };
                surface.fill_rect(
                    Rect::new(
                        x + i as f64 * (segment_width + SEGMENT_GAP),
                        bar_bottom - seg_height,
                        segment_width,
                        seg_height,
                    ),
                    range.color,
                );
            }
            if let Some(ci) = m.current_index {
                debug_assert!(ci < m.ranges.len());
                let center = x + ci as f64 * (segment_width + SEGMENT_GAP) + segment_width / 2.0;
                let top = bar_bottom - CURRENT_SEGMENT_HEIGHT - NEEDLE_HEIGHT;
                surface.fill_polygon(
                    vec![
                        (center, top),
                        (center + NEEDLE_WIDTH / 2.0, top + NEEDLE_HEIGHT),
                        (center - NEEDLE_WIDTH / 2.0, top + NEEDLE_HEIGHT),
                    ],
                    crate::style::palette::BLACK,
                );
            }
        }

        // Description plus the min/max bounds row.
        let caption = self.styles.caption_70.clone();
        let desc_y = bar_bottom + spacing::PADDING;
        m.description.render(surface, x, desc_y);
        let bounds_y = desc_y + m.description.height();
        let min_label = Paragraph::wrap(&self.data.min_score.to_string(), &caption, CHART_WIDTH);
        min_label.render(surface, x, bounds_y);
        if let Some(last) = m.ranges.last() {
            let max_label = Paragraph::wrap(
                &last.max_score.to_string(),
                &caption.with_align(Align::Right),
                CHART_WIDTH,
            );
            max_label.render(surface, x, bounds_y);
        }

        // Text column.
        let text_x = x + CHART_WIDTH + spacing::GAP;
        let mut cursor = y;
        m.aux_title.render(surface, text_x, cursor);
        cursor += m.aux_title.height() + spacing::PADDING;
        let chip = Rect::new(
            text_x,
            cursor,
            m.aux_value.max_line_width() + 2.0 * spacing::PADDING,
            m.aux_value.height() + 2.0 * spacing::PADDING,
        );
        surface.fill_rect(chip, m.display.color);
        m.aux_value
            .render(surface, text_x + spacing::PADDING, cursor + spacing::PADDING);
        cursor += chip.height + spacing::PADDING;
        m.sentence.render(surface, text_x, cursor);
    }
}
