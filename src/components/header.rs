//! The page header band.
//!
//! Every page carries the same two-frame band: report identity on the
//! left, emission metadata plus the pagination line on the right. The
//! band is rendered once per page by the pagination engine, outside the
//! content flow, so it can never be displaced by section content.

use crate::flow::{Frame, Para};
use crate::geometry::{spacing, Edges, Rect};
use crate::model::HeaderData;
use crate::style::{palette, Align, StyleSheet};
use crate::surface::Surface;

pub struct PageHeader {
    data: HeaderData,
}

impl PageHeader {
    pub fn new(data: HeaderData) -> Self {
        Self { data }
    }

    /// Render the band into `rect` with resolved page numbers.
    pub fn render(
        &self,
        surface: &mut Surface,
        rect: Rect,
        styles: &StyleSheet,
        page: usize,
        total: usize,
    ) {
        surface.fill_rect(rect, palette::GRAY);

        let half = rect.width / 2.0;
        let left = Frame::with_padding(
            Rect::new(rect.x, rect.y, half, rect.height),
            Edges::uniform(spacing::PADDING),
        );
        let right = Frame::with_padding(
            Rect::new(rect.x + half, rect.y, half, rect.height),
            Edges::uniform(spacing::PADDING),
        );

        let entity = if self.data.entity_id.is_empty() {
            self.data.entity_name.clone()
        } else {
            format!("{} ({})", self.data.entity_name, self.data.entity_id)
        };
        left.add_from_list(
            vec![
                Para::boxed(&self.data.category_name, styles.subtitle.clone()),
                Para::boxed(&self.data.product_name, styles.body.clone()),
                Para::boxed(entity, styles.body.clone()),
            ],
            surface,
        );

        let right_style = styles.caption_70.with_align(Align::Right);
        right.add_from_list(
            vec![
                Para::boxed(&self.data.date_time, right_style.clone()),
                Para::boxed(&self.data.protocol, right_style.clone()),
                Para::boxed(self.data.pagination_line(page, total), right_style),
            ],
            surface,
        );
    }
}
