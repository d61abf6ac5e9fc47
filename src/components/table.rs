//! Record table: a header row, composite data rows, and row-wise page
//! splitting.
//!
//! Column widths come from a throwaway natural-width pass over every cell,
//! scaled to the available width. Each data row is atomic: the grid cells
//! plus the row's optional nested key/value sub-list always stay on one
//! page together. Splitting carves the row list at a page boundary and
//! repeats the header row on the continuation.

use indexmap::IndexMap;

use crate::flow::{Element, Split};
use crate::geometry::{spacing, Rect, Size};
use crate::model::{ListData, TableData};
use crate::style::{palette, StyleSheet};
use crate::surface::Surface;
use crate::text::Paragraph;

use super::list::KeyValueList;

const HAIRLINE: f64 = 0.5;

struct MeasuredRow {
    cells: Vec<Paragraph>,
    nested: Option<KeyValueList>,
    cell_height: f64,
    height: f64,
}

struct MeasuredTable {
    col_widths: Vec<f64>,
    header: Vec<Paragraph>,
    header_height: f64,
    rows: Vec<MeasuredRow>,
}

pub struct TableFlow {
    columns: IndexMap<String, String>,
    nested_fields: IndexMap<String, String>,
    rows: Vec<IndexMap<String, String>>,
    styles: StyleSheet,
    /// Column widths fixed by the first measurement over the full row
    /// set. Fragments produced by `split` inherit them, so column
    /// boundaries stay put across a page break.
    shared_widths: Option<Vec<f64>>,
    measured: Option<MeasuredTable>,
}

impl TableFlow {
    pub fn new(data: TableData, styles: &StyleSheet) -> Self {
        Self {
            columns: data.columns,
            nested_fields: data.nested_fields,
            rows: data.rows,
            styles: styles.clone(),
            shared_widths: None,
            measured: None,
        }
    }

    pub fn boxed(data: TableData, styles: &StyleSheet) -> Box<dyn Element> {
        Box::new(Self::new(data, styles))
    }

    fn subset(&self, rows: Vec<IndexMap<String, String>>) -> TableFlow {
        TableFlow {
            columns: self.columns.clone(),
            nested_fields: self.nested_fields.clone(),
            rows,
            styles: self.styles.clone(),
            shared_widths: self.shared_widths.clone(),
            measured: None,
        }
    }

    /// Natural column widths scaled to fill `max_width` exactly.
    fn column_widths(&self, max_width: f64) -> Vec<f64> {
        let bold = &self.styles.body_bold;
        let body = &self.styles.body;
        let mut widths: Vec<f64> = self
            .columns
            .iter()
            .map(|(key, label)| {
                let mut w = bold.font.measure_string(label, bold.size);
                for row in &self.rows {
                    let cell = row.get(key).map(String::as_str).unwrap_or("");
                    w = w.max(body.font.measure_string(cell, body.size));
                }
                w + 2.0 * spacing::PADDING
            })
            .collect();
        let natural: f64 = widths.iter().sum();
        if natural > 0.0 {
            let factor = max_width / natural;
            for w in widths.iter_mut() {
                *w *= factor;
            }
        }
        widths
    }

    fn nested_for(&self, row: &IndexMap<String, String>) -> Option<KeyValueList> {
        if self.nested_fields.is_empty() {
            return None;
        }
        let has_value = self
            .nested_fields
            .keys()
            .any(|k| row.get(k).map(|v| !v.is_empty()).unwrap_or(false));
        if !has_value {
            return None;
        }
        let data = ListData {
            fields: self.nested_fields.clone(),
            items: row.clone(),
        };
        Some(KeyValueList::new(data, &self.styles))
    }
}

impl Element for TableFlow {
    fn measure(&mut self, max_width: f64, max_height: f64) -> Size {
        let col_widths = match &self.shared_widths {
            Some(widths) => widths.clone(),
            None => {
                let widths = self.column_widths(max_width);
                self.shared_widths = Some(widths.clone());
                widths
            }
        };

        let header: Vec<Paragraph> = self
            .columns
            .values()
            .zip(&col_widths)
            .map(|(label, w)| {
                Paragraph::wrap(label, &self.styles.body_bold, w - 2.0 * spacing::PADDING)
            })
            .collect();
        let header_height = header
            .iter()
            .map(Paragraph::height)
            .fold(0.0, f64::max)
            + 2.0 * spacing::PADDING;

        let mut rows = Vec::new();
        let mut height = header_height;
        for row in &self.rows {
            let cells: Vec<Paragraph> = self
                .columns
                .keys()
                .zip(&col_widths)
                .map(|(key, w)| {
                    let value = row.get(key).map(String::as_str).unwrap_or("");
                    Paragraph::wrap(value, &self.styles.body, w - 2.0 * spacing::PADDING)
                })
                .collect();
            let cell_height = cells.iter().map(Paragraph::height).fold(0.0, f64::max)
                + 2.0 * spacing::PADDING;

            let mut nested = self.nested_for(row);
            let nested_height = nested
                .as_mut()
                .map(|list| {
                    list.measure(max_width - 2.0 * spacing::PADDING, max_height)
                        .height
                        + spacing::PADDING
                })
                .unwrap_or(0.0);

            let row_height = cell_height + nested_height;
            height += row_height;
            rows.push(MeasuredRow {
                cells,
                nested,
                cell_height,
                height: row_height,
            });
        }

        self.measured = Some(MeasuredTable {
            col_widths,
            header,
            header_height,
            rows,
        });
        Size::new(max_width, height)
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let Some(m) = &self.measured else {
            return;
        };
        let width: f64 = m.col_widths.iter().sum();

        surface.fill_rect(Rect::new(x, y, width, m.header_height), palette::GRAY);
        let mut cell_x = x;
        for (para, w) in m.header.iter().zip(&m.col_widths) {
            para.render(surface, cell_x + spacing::PADDING, y + spacing::PADDING);
            cell_x += w;
        }

        let mut cursor = y + m.header_height;
        for row in &m.rows {
            let mut cell_x = x;
            for (para, w) in row.cells.iter().zip(&m.col_widths) {
                para.render(surface, cell_x + spacing::PADDING, cursor + spacing::PADDING);
                cell_x += w;
            }
            if let Some(nested) = &row.nested {
                nested.render(
                    surface,
                    x + spacing::PADDING,
                    cursor + row.cell_height + spacing::PADDING,
                );
            }
            cursor += row.height;
            surface.fill_rect(
                Rect::new(x, cursor - HAIRLINE, width, HAIRLINE),
                palette::DARK_GRAY,
            );
        }
    }

    fn split(&mut self, max_width: f64, max_height: f64) -> Split {
        if self.measured.is_none() {
            self.measure(max_width, max_height);
        }
        let m = match &self.measured {
            Some(m) => m,
            None => return Split::Unsupported,
        };
        if m.rows.is_empty() {
            return Split::Defer;
        }

        // The header row never stands alone: at least one data row has to
        // fit under it, otherwise the whole table moves on.
        if m.header_height + m.rows[0].height > max_height {
            return Split::Defer;
        }

        let mut used = m.header_height;
        let mut fitted_count = 0;
        for row in &m.rows {
            if used + row.height > max_height {
                break;
            }
            used += row.height;
            fitted_count += 1;
        }

        let remainder_rows = self.rows.split_off(fitted_count);
        let fitted_rows = std::mem::take(&mut self.rows);
        if remainder_rows.is_empty() {
            return Split::Parts {
                fitted: vec![Box::new(self.subset(fitted_rows))],
                remainder: Vec::new(),
            };
        }
        Split::Parts {
            fitted: vec![Box::new(self.subset(fitted_rows))],
            remainder: vec![Box::new(self.subset(remainder_rows))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table(n: usize) -> TableData {
        let mut columns = IndexMap::new();
        columns.insert("date".to_string(), "Date".to_string());
        columns.insert("value".to_string(), "Value".to_string());
        TableData {
            columns,
            rows: (0..n)
                .map(|i| row(&[("date", "2024-01-01"), ("value", &format!("{i}.00"))]))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_column_widths_fill_available_width() {
        let mut t = TableFlow::new(table(3), &StyleSheet::new());
        t.measure(400.0, 700.0);
        let m = t.measured.as_ref().unwrap();
        let total: f64 = m.col_widths.iter().sum();
        assert!((total - 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_wider_content_gets_wider_column() {
        let mut columns = IndexMap::new();
        columns.insert("a".to_string(), "A".to_string());
        columns.insert("b".to_string(), "B".to_string());
        let data = TableData {
            columns,
            rows: vec![row(&[("a", "x"), ("b", "a much longer cell value")])],
            ..Default::default()
        };
        let mut t = TableFlow::new(data, &StyleSheet::new());
        t.measure(400.0, 700.0);
        let m = t.measured.as_ref().unwrap();
        assert!(m.col_widths[1] > m.col_widths[0]);
    }

    #[test]
    fn test_header_and_cells_rendered() {
        let mut t = TableFlow::new(table(2), &StyleSheet::new());
        t.measure(400.0, 700.0);
        let mut s = Surface::new(400.0, 700.0, false);
        t.render(&mut s, 0.0, 0.0);
        let text = s.text_content();
        assert!(text.contains(&"Date".to_string()));
        assert!(text.contains(&"0.00".to_string()));
        assert!(text.contains(&"1.00".to_string()));
    }

    #[test]
    fn test_split_repeats_header_on_remainder() {
        let mut t = TableFlow::new(table(20), &StyleSheet::new());
        let full = t.measure(400.0, 10_000.0);
        let budget = full.height / 2.0;
        match t.split(400.0, budget) {
            Split::Parts { mut fitted, mut remainder } => {
                let fitted_size = fitted[0].measure(400.0, 10_000.0);
                assert!(fitted_size.height <= budget + 1e-6);

                let mut s = Surface::new(400.0, 10_000.0, false);
                remainder[0].measure(400.0, 10_000.0);
                remainder[0].render(&mut s, 0.0, 0.0);
                assert!(s.text_content().contains(&"Date".to_string()));
            }
            _ => panic!("expected a row split"),
        }
    }

    #[test]
    fn test_split_fragments_share_column_widths() {
        // The only long cell sits in the first row, so a fragment that
        // recomputed widths from its own rows would shift the boundary.
        let mut columns = IndexMap::new();
        columns.insert("a".to_string(), "A".to_string());
        columns.insert("b".to_string(), "B".to_string());
        let mut rows: Vec<IndexMap<String, String>> =
            vec![row(&[("a", "a cell value that is much wider than the rest"), ("b", "x")])];
        for i in 0..20 {
            rows.push(row(&[("a", "s"), ("b", &format!("{i}") as &str)]));
        }
        let data = TableData {
            columns,
            rows,
            ..Default::default()
        };

        let mut t = TableFlow::new(data, &StyleSheet::new());
        let full = t.measure(400.0, 10_000.0);
        let widths = t.measured.as_ref().unwrap().col_widths.clone();

        match t.split(400.0, full.height / 2.0) {
            Split::Parts { mut fitted, mut remainder } => {
                for part in fitted.iter_mut().chain(remainder.iter_mut()) {
                    part.measure(400.0, 10_000.0);
                    let mut s = Surface::new(400.0, 10_000.0, false);
                    part.render(&mut s, 0.0, 0.0);
                    // Second header cell starts at the shared boundary.
                    let b_x = s
                        .ops()
                        .iter()
                        .find_map(|op| match op {
                            crate::surface::DrawOp::TextLine { x, text, .. } if text == "B" => {
                                Some(*x)
                            }
                            _ => None,
                        })
                        .unwrap();
                    assert!((b_x - (widths[0] + crate::geometry::spacing::PADDING)).abs() < 1e-6);
                }
            }
            _ => panic!("expected a row split"),
        }
    }

    #[test]
    fn test_split_defers_when_first_row_does_not_fit() {
        let mut t = TableFlow::new(table(5), &StyleSheet::new());
        t.measure(400.0, 700.0);
        assert!(matches!(t.split(400.0, 5.0), Split::Defer));
    }

    #[test]
    fn test_split_preserves_all_rows() {
        let mut t = TableFlow::new(table(10), &StyleSheet::new());
        let full = t.measure(400.0, 10_000.0);
        match t.split(400.0, full.height / 3.0) {
            Split::Parts { mut fitted, mut remainder } => {
                let mut texts = Vec::new();
                for part in fitted.iter_mut().chain(remainder.iter_mut()) {
                    let mut s = Surface::new(400.0, 10_000.0, false);
                    part.measure(400.0, 10_000.0);
                    part.render(&mut s, 0.0, 0.0);
                    texts.extend(s.text_content());
                }
                for i in 0..10 {
                    assert!(texts.contains(&format!("{i}.00")), "row {i} lost in split");
                }
            }
            _ => panic!("expected a row split"),
        }
    }

    #[test]
    fn test_nested_list_kept_with_row() {
        let mut columns = IndexMap::new();
        columns.insert("name".to_string(), "Name".to_string());
        let mut nested_fields = IndexMap::new();
        nested_fields.insert("detail".to_string(), "Detail".to_string());
        let data = TableData {
            columns,
            nested_fields,
            rows: vec![
                row(&[("name", "first"), ("detail", "extra info")]),
                row(&[("name", "second")]),
            ],
            ..Default::default()
        };
        let mut t = TableFlow::new(data, &StyleSheet::new());
        t.measure(400.0, 700.0);
        let m = t.measured.as_ref().unwrap();
        assert!(m.rows[0].nested.is_some());
        assert!(m.rows[1].nested.is_none());
        assert!(m.rows[0].height > m.rows[1].height);

        let mut s = Surface::new(400.0, 700.0, false);
        t.render(&mut s, 0.0, 0.0);
        let text = s.text_content();
        assert!(text.contains(&"Detail:".to_string()));
        assert!(text.contains(&"extra info".to_string()));
    }
}
