//! Gauge cards: leveled indicators grouped under subtitles.
//!
//! Each card shows a three-glyph gauge row where the first `level` glyphs
//! carry the card color and the rest stay muted. Levels outside 0..=3 are
//! clamped rather than rejected.

use crate::flow::Element;
use crate::geometry::{mm, spacing, Rect, Size};
use crate::icon::{Icon, IconAsset, IconScale};
use crate::model::{GaugeCardData, GaugeCardListData};
use crate::style::{palette, StyleSheet, TextStyle};
use crate::surface::Surface;
use crate::text::Paragraph;

pub const GAUGE_COUNT: i32 = 3;
const GLYPH_SIZE: f64 = mm(3.7);
const GLYPH_GAP: f64 = 2.0;
const STRIP_WIDTH: f64 = spacing::PADDING;
const MUTED_OPACITY: f64 = 0.35;

pub fn clamped_level(level: i32) -> i32 {
    level.clamp(0, GAUGE_COUNT)
}

struct MeasuredCard {
    data: GaugeCardData,
    title: Paragraph,
    description: Paragraph,
    level_text: Paragraph,
    height: f64,
}

struct MeasuredGroup {
    subtitle: Paragraph,
    cards: Vec<MeasuredCard>,
    height: f64,
}

pub struct GaugeCardList {
    data: GaugeCardListData,
    subtitle_style: TextStyle,
    title_style: TextStyle,
    body_style: TextStyle,
    measured: Option<Vec<MeasuredGroup>>,
    column_width: f64,
}

impl GaugeCardList {
    pub fn new(data: GaugeCardListData, styles: &StyleSheet) -> Self {
        Self {
            data,
            subtitle_style: styles.subtitle.clone(),
            title_style: styles.body_bold.clone(),
            body_style: styles.caption_70.clone(),
            measured: None,
            column_width: 0.0,
        }
    }

    pub fn boxed(data: GaugeCardListData, styles: &StyleSheet) -> Box<dyn Element> {
        Box::new(Self::new(data, styles))
    }

    fn measure_card(&self, card: &GaugeCardData, column_width: f64) -> MeasuredCard {
        let text_width = column_width - 2.0 * spacing::PADDING - STRIP_WIDTH;
        let title = Paragraph::wrap(&card.title, &self.title_style, text_width);
        let description = Paragraph::wrap(&card.description, &self.body_style, text_width);
        let level_style = self.body_style.with_color(card.color);
        let level_text = Paragraph::wrap(&card.level_text, &level_style, text_width - GAUGE_COUNT as f64 * (GLYPH_SIZE + GLYPH_GAP));
        let gauge_row = GLYPH_SIZE.max(level_text.height());
        let height = title.height()
            + description.height()
            + spacing::PADDING
            + gauge_row
            + 2.0 * spacing::PADDING;
        MeasuredCard {
            data: card.clone(),
            title,
            description,
            level_text,
            height,
        }
    }

    fn column_height(cards: &[MeasuredCard], start: usize) -> f64 {
        cards
            .iter()
            .skip(start)
            .step_by(2)
            .enumerate()
            .map(|(i, c)| c.height + if i > 0 { spacing::PADDING } else { 0.0 })
            .sum()
    }

    fn render_card(&self, surface: &mut Surface, card: &MeasuredCard, x: f64, y: f64) {
        let rect = Rect::new(x, y, self.column_width, card.height);
        surface.fill_rect(rect, palette::GRAY);
        surface.fill_rect(
            Rect::new(rect.right() - STRIP_WIDTH, y, STRIP_WIDTH, card.height),
            card.data.color,
        );

        let text_x = x + spacing::PADDING;
        let mut cursor = y + spacing::PADDING;
        card.title.render(surface, text_x, cursor);
        cursor += card.title.height();
        card.description.render(surface, text_x, cursor);
        cursor += card.description.height() + spacing::PADDING;

        // Fill runs right-to-left: the rightmost `level` glyphs are active.
        let filled = clamped_level(card.data.level);
        for i in 0..GAUGE_COUNT {
            let glyph_x = text_x + i as f64 * (GLYPH_SIZE + GLYPH_GAP);
            let (tint, opacity) = if i >= GAUGE_COUNT - filled {
                (card.data.color, 1.0)
            } else {
                (palette::DARK_GRAY, MUTED_OPACITY)
            };
            Icon::new(IconAsset::Gauge, IconScale::Width(GLYPH_SIZE), tint, opacity)
                .render(surface, glyph_x, cursor);
        }
        let text_after_glyphs = text_x + GAUGE_COUNT as f64 * (GLYPH_SIZE + GLYPH_GAP);
        card.level_text.render(surface, text_after_glyphs, cursor);
    }
}

impl Element for GaugeCardList {
    fn measure(&mut self, max_width: f64, _max_height: f64) -> Size {
        let column_width = (max_width - spacing::GAP) / 2.0;
        let mut measured = Vec::new();
        let mut total = 0.0;
        for (gi, group) in self.data.groups.iter().enumerate() {
            let subtitle = Paragraph::wrap(&group.title, &self.subtitle_style, max_width);
            let cards: Vec<MeasuredCard> = group
                .cards
                .iter()
                .map(|c| self.measure_card(c, column_width))
                .collect();
            let body = Self::column_height(&cards, 0).max(Self::column_height(&cards, 1));
            let height = subtitle.height() + spacing::PADDING + body;
            if gi > 0 {
                total += spacing::GAP;
            }
            total += height;
            measured.push(MeasuredGroup {
                subtitle,
                cards,
                height,
            });
        }
        self.measured = Some(measured);
        self.column_width = column_width;
        Size::new(max_width, total)
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let Some(measured) = &self.measured else {
            return;
        };
        let mut group_y = y;
        for group in measured {
            group.subtitle.render(surface, x, group_y);
            let cards_y = group_y + group.subtitle.height() + spacing::PADDING;
            let mut cursors = [cards_y; 2];
            for (i, card) in group.cards.iter().enumerate() {
                let col = i % 2;
                let card_x = x + col as f64 * (self.column_width + spacing::GAP);
                self.render_card(surface, card, card_x, cursors[col]);
                cursors[col] += card.height + spacing::PADDING;
            }
            group_y += group.height + spacing::GAP;
        }
    }
}
