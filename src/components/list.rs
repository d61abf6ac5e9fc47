//! Key/value list: labeled fields in two alternating columns.
//!
//! Entries keep the field order of the payload and alternate between the
//! columns, even indexes left and odd indexes right. Each column computes
//! its own label gutter from its widest label, so values line up within a
//! column without a global tabstop.

use crate::flow::Element;
use crate::geometry::{spacing, Size};
use crate::model::ListData;
use crate::style::{Align, StyleSheet, TextStyle};
use crate::surface::Surface;
use crate::text::Paragraph;

struct Entry {
    label: String,
    value: Paragraph,
    height: f64,
}

struct Column {
    entries: Vec<Entry>,
    label_width: f64,
    height: f64,
}

pub struct KeyValueList {
    data: ListData,
    label_style: TextStyle,
    value_style: TextStyle,
    column_width: f64,
    columns: Option<[Column; 2]>,
}

impl KeyValueList {
    pub fn new(data: ListData, styles: &StyleSheet) -> Self {
        Self {
            data,
            label_style: styles.body_bold.clone(),
            value_style: styles.body.clone(),
            column_width: 0.0,
            columns: None,
        }
    }

    pub fn boxed(data: ListData, styles: &StyleSheet) -> Box<dyn Element> {
        Box::new(Self::new(data, styles))
    }

    fn column_width(max_width: f64) -> f64 {
        (max_width - spacing::GAP) / 2.0
    }

    fn build_column(&self, indexes: impl Iterator<Item = usize>, column_width: f64) -> Column {
        let labeled: Vec<(String, String)> = {
            let pairs: Vec<(&String, &String)> = self.data.fields.iter().collect();
            indexes
                .filter_map(|i| pairs.get(i))
                .map(|(key, label)| (format!("{label}:"), self.data.value(key).to_string()))
                .collect()
        };

        let label_width = labeled
            .iter()
            .map(|(label, _)| {
                self.label_style
                    .font
                    .measure_string(label, self.label_style.size)
            })
            .fold(0.0, f64::max);

        let value_width = (column_width - label_width - spacing::PADDING).max(0.0);
        let mut entries = Vec::new();
        let mut height = 0.0;
        for (label, value) in labeled {
            let para = Paragraph::wrap(&value, &self.value_style, value_width);
            let entry_height = para.height().max(self.label_style.leading);
            height += entry_height;
            entries.push(Entry {
                label,
                value: para,
                height: entry_height,
            });
        }

        Column {
            entries,
            label_width,
            height,
        }
    }
}

impl Element for KeyValueList {
    fn measure(&mut self, max_width: f64, _max_height: f64) -> Size {
        let column_width = Self::column_width(max_width);
        let count = self.data.fields.len();
        let left = self.build_column((0..count).step_by(2), column_width);
        let right = self.build_column((1..count).step_by(2), column_width);
        let height = left.height.max(right.height);
        self.column_width = column_width;
        self.columns = Some([left, right]);
        Size::new(max_width, height)
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let Some(columns) = &self.columns else {
            return;
        };
        let label_para_style = self.label_style.with_align(Align::Right);
        for (ci, column) in columns.iter().enumerate() {
            let column_x = x + ci as f64 * (self.column_width + spacing::GAP);
            let mut cursor = y;
            for entry in &column.entries {
                let label = Paragraph::wrap(&entry.label, &label_para_style, column.label_width);
                label.render(surface, column_x, cursor);
                entry.value.render(
                    surface,
                    column_x + column.label_width + spacing::PADDING,
                    cursor,
                );
                cursor += entry.height;
            }
        }
    }
}
