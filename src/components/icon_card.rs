//! Icon cards: tinted alert cards in three round-robin columns.

use crate::flow::Element;
use crate::geometry::{mm, spacing, Rect, Size};
use crate::icon::{Icon, IconScale};
use crate::model::IconCardData;
use crate::style::{icon_color_on, text_color_on, StyleSheet, TextStyle};
use crate::surface::Surface;
use crate::text::Paragraph;

const COLUMN_COUNT: usize = 3;
/// Width reserved at the card's left edge for the icon.
const ICON_GUTTER: f64 = mm(13.0);
const ICON_WIDTH: f64 = mm(6.0);

struct MeasuredCard {
    data: IconCardData,
    title: Paragraph,
    description: Paragraph,
    height: f64,
}

pub struct IconCardList {
    cards: Vec<IconCardData>,
    title_style: TextStyle,
    body_style: TextStyle,
    measured: Option<Vec<MeasuredCard>>,
    column_width: f64,
    height: f64,
}

impl IconCardList {
    pub fn new(cards: Vec<IconCardData>, styles: &StyleSheet) -> Self {
        Self {
            cards,
            title_style: styles.body_bold.clone(),
            body_style: styles.caption.clone(),
            measured: None,
            column_width: 0.0,
            height: 0.0,
        }
    }

    pub fn boxed(cards: Vec<IconCardData>, styles: &StyleSheet) -> Box<dyn Element> {
        Box::new(Self::new(cards, styles))
    }
}

impl Element for IconCardList {
    fn measure(&mut self, max_width: f64, _max_height: f64) -> Size {
        let gaps = (COLUMN_COUNT - 1) as f64 * spacing::PADDING;
        let column_width = (max_width - gaps) / COLUMN_COUNT as f64;
        let text_width = column_width - ICON_GUTTER - spacing::PADDING;

        let mut measured = Vec::new();
        for card in &self.cards {
            let text_color = text_color_on(card.color);
            let title = Paragraph::wrap(
                &card.title,
                &self.title_style.with_color(text_color),
                text_width,
            );
            let description = Paragraph::wrap(
                &card.description,
                &self.body_style.with_color(text_color),
                text_width,
            );
            let text_height = title.height() + description.height();
            let height = text_height.max(ICON_WIDTH) + 2.0 * spacing::PADDING;
            measured.push(MeasuredCard {
                data: card.clone(),
                title,
                description,
                height,
            });
        }

        // Round-robin column assignment: card i lands in column i mod 3.
        let mut column_heights = [0.0_f64; COLUMN_COUNT];
        for (i, card) in measured.iter().enumerate() {
            let col = i % COLUMN_COUNT;
            if column_heights[col] > 0.0 {
                column_heights[col] += spacing::PADDING;
            }
            column_heights[col] += card.height;
        }
        let height = column_heights.iter().fold(0.0_f64, |a, &b| a.max(b));

        self.measured = Some(measured);
        self.column_width = column_width;
        self.height = height;
        Size::new(max_width, height)
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let Some(measured) = &self.measured else {
            return;
        };
        let mut cursors = [y; COLUMN_COUNT];
        for (i, card) in measured.iter().enumerate() {
            let col = i % COLUMN_COUNT;
            let card_x = x + col as f64 * (self.column_width + spacing::PADDING);
            let card_y = cursors[col];
            let rect = Rect::new(card_x, card_y, self.column_width, card.height);
            surface.fill_rect(rect, card.data.color);

            let icon = Icon::named(
                &card.data.icon,
                IconScale::Width(ICON_WIDTH),
                icon_color_on(card.data.color),
                1.0,
            );
            let icon_size = icon.size();
            icon.render(
                surface,
                card_x + (ICON_GUTTER - icon_size.width) / 2.0,
                card_y + (card.height - icon_size.height) / 2.0,
            );

            let text_x = card_x + ICON_GUTTER;
            let mut text_y = card_y + spacing::PADDING;
            card.title.render(surface, text_x, text_y);
            text_y += card.title.height();
            card.description.render(surface, text_x, text_y);

            cursors[col] = card_y + card.height + spacing::PADDING;
        }
    }
}
