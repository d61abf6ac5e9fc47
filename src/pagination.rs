//! The two-pass pagination engine.
//!
//! Page totals are only known once everything is laid out, so `build`
//! runs the flow twice: a discovery pass whose pages are thrown away
//! establishes the page count, then the final pass renders headers with
//! the real "page N of TOTAL" line. Both passes construct fresh element
//! trees from the section payloads, so split state from one pass can
//! never leak into the other. All page-numbering state lives in a
//! per-build [`PaginationContext`]; nothing is ambient.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::components::header::PageHeader;
use crate::components::build_section;
use crate::error::ReportError;
use crate::flow::{Element, Spacer, Split, EPSILON};
use crate::geometry::{spacing, Rect, A4_HEIGHT, A4_WIDTH};
use crate::model::{HeaderData, SectionComponent};
use crate::pdf::{DocumentInfo, PdfWriter};
use crate::style::StyleSheet;
use crate::surface::Surface;

/// Build-time switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Stroke frame and content boundaries for layout debugging.
    pub debug_boundaries: bool,
    /// Turn frame overflow in the final pass into an error instead of a
    /// logged warning.
    pub strict_overflow: bool,
}

/// Fixed A4 page carve-up: header band on top, content area below.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub header: Rect,
    pub content: Rect,
}

impl PageGeometry {
    pub fn a4() -> Self {
        let header = Rect::new(
            spacing::SAFE_MARGIN,
            spacing::SAFE_MARGIN,
            A4_WIDTH - 2.0 * spacing::SAFE_MARGIN,
            spacing::HEADER_HEIGHT,
        );
        let content_top = header.bottom() + spacing::GAP;
        let content = Rect::new(
            spacing::SAFE_MARGIN,
            content_top,
            A4_WIDTH - 2.0 * spacing::SAFE_MARGIN,
            A4_HEIGHT - content_top - spacing::SAFE_MARGIN,
        );
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            header,
            content,
        }
    }
}

/// Per-build page numbering state.
#[derive(Debug, Clone, Copy)]
pub struct PaginationContext {
    pub page_number: usize,
    pub total_pages: usize,
}

impl PaginationContext {
    /// Discovery pass: the total is not known yet.
    pub fn discovery() -> Self {
        Self {
            page_number: 1,
            total_pages: 0,
        }
    }

    pub fn finalized(total_pages: usize) -> Self {
        Self {
            page_number: 1,
            total_pages,
        }
    }
}

/// Assembles a report and renders it to PDF bytes.
pub struct ReportBuilder {
    header: HeaderData,
    sections: Vec<SectionComponent>,
    options: BuildOptions,
    styles: StyleSheet,
}

impl ReportBuilder {
    pub fn new(header: HeaderData) -> Self {
        Self {
            header,
            sections: Vec::new(),
            options: BuildOptions::default(),
            styles: StyleSheet::new(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn add_section(&mut self, section: SectionComponent) -> &mut Self {
        self.sections.push(section);
        self
    }

    /// Run both pagination passes and serialize the final pages.
    pub fn build(&self) -> Result<Vec<u8>, ReportError> {
        let discovery = self.paginate(PaginationContext::discovery());
        let total = discovery.len();
        debug!(pages = total, "discovery pass complete");

        let pages = self.paginate(PaginationContext::finalized(total));
        debug_assert_eq!(pages.len(), total, "pass page counts diverged");

        let overflow: u32 = pages.iter().map(Surface::overflow_events).sum();
        if overflow > 0 && self.options.strict_overflow {
            return Err(ReportError::Overflow { events: overflow });
        }

        let info = DocumentInfo {
            title: self.header.product_name.clone(),
            author: self.header.category_name.clone(),
        };
        Ok(PdfWriter::new(info).render(&pages))
    }

    /// One full pagination pass.
    pub fn paginate(&self, ctx: PaginationContext) -> Vec<Surface> {
        let geometry = PageGeometry::a4();
        let header = PageHeader::new(self.header.clone());

        let mut queue: VecDeque<Box<dyn Element>> = VecDeque::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                queue.push_back(Spacer::boxed(2.0 * spacing::GAP));
            }
            queue.push_back(build_section(section, &self.styles));
        }

        let mut ctx = ctx;
        let mut pages = Vec::new();
        let mut page = self.new_page(&geometry, &header, ctx);
        let mut cursor = geometry.content.y;

        while let Some(mut element) = queue.pop_front() {
            let at_top = cursor <= geometry.content.y + EPSILON;
            if at_top && element.is_spacer() {
                continue;
            }

            let remaining = geometry.content.bottom() - cursor;
            let size = element.measure(geometry.content.width, remaining.max(0.0));
            if size.height <= remaining + EPSILON {
                element.render(&mut page, geometry.content.x, cursor);
                cursor += size.height;
                continue;
            }

            match element.split(geometry.content.width, remaining.max(0.0)) {
                Split::Parts { fitted, remainder } => {
                    for mut part in fitted {
                        let part_size =
                            part.measure(geometry.content.width, remaining.max(0.0));
                        part.render(&mut page, geometry.content.x, cursor);
                        cursor += part_size.height;
                    }
                    if remainder.is_empty() {
                        continue;
                    }
                    for part in remainder.into_iter().rev() {
                        queue.push_front(part);
                    }
                }
                Split::Defer | Split::Unsupported => {
                    if at_top {
                        // Taller than a whole page: draw it anyway and
                        // let the warning surface the problem. The next
                        // element finds no room and breaks the page.
                        warn!(
                            height = size.height,
                            capacity = geometry.content.height,
                            "element taller than page, drawing with overflow"
                        );
                        page.note_overflow();
                        element.render(&mut page, geometry.content.x, cursor);
                        cursor += size.height;
                        continue;
                    }
                    queue.push_front(element);
                }
            }

            pages.push(page);
            ctx.page_number += 1;
            page = self.new_page(&geometry, &header, ctx);
            cursor = geometry.content.y;
        }

        pages.push(page);
        pages
    }

    fn new_page(
        &self,
        geometry: &PageGeometry,
        header: &PageHeader,
        ctx: PaginationContext,
    ) -> Surface {
        let mut page = Surface::new(geometry.width, geometry.height, self.options.debug_boundaries);
        header.render(
            &mut page,
            geometry.header,
            &self.styles,
            ctx.page_number,
            ctx.total_pages,
        );
        if self.options.debug_boundaries {
            page.stroke_boundary(geometry.content);
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn header() -> HeaderData {
        HeaderData {
            category_name: "Credit analysis".to_string(),
            product_name: "Positive report".to_string(),
            entity_name: "Acme".to_string(),
            entity_id: "1".to_string(),
            date_time: "2024-05-01".to_string(),
            protocol: "P-1".to_string(),
            ..Default::default()
        }
    }

    fn big_table(rows: usize) -> SectionComponent {
        let mut columns = IndexMap::new();
        columns.insert("d".to_string(), "Date".to_string());
        columns.insert("v".to_string(), "Value".to_string());
        SectionComponent::Table {
            title: "Payment history".to_string(),
            data: crate::model::TableData {
                columns,
                rows: (0..rows)
                    .map(|i| {
                        let mut r = IndexMap::new();
                        r.insert("d".to_string(), format!("2024-01-{:02}", i % 28 + 1));
                        r.insert("v".to_string(), format!("{i}.00"));
                        r
                    })
                    .collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_short_report_is_one_page() {
        let mut b = ReportBuilder::new(header());
        b.add_section(big_table(3));
        let pages = b.paginate(PaginationContext::discovery());
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_long_table_spills_and_repeats_header_row() {
        let mut b = ReportBuilder::new(header());
        b.add_section(big_table(200));
        let pages = b.paginate(PaginationContext::finalized(9));
        assert!(pages.len() > 1);
        for page in &pages {
            let text = page.text_content();
            // Page header band on every page.
            assert!(text.iter().any(|t| t == "Credit analysis"));
            // Table header row repeated on every continuation.
            assert!(text.iter().any(|t| t == "Date"));
        }
    }

    #[test]
    fn test_every_row_survives_pagination() {
        let rows = 150;
        let mut b = ReportBuilder::new(header());
        b.add_section(big_table(rows));
        let pages = b.paginate(PaginationContext::discovery());
        let all: Vec<String> = pages.iter().flat_map(|p| p.text_content()).collect();
        for i in 0..rows {
            assert!(all.contains(&format!("{i}.00")), "row {i} missing");
        }
    }

    #[test]
    fn test_passes_agree_on_page_count() {
        let mut b = ReportBuilder::new(header());
        b.add_section(big_table(120));
        b.add_section(big_table(40));
        let discovery = b.paginate(PaginationContext::discovery());
        let done = b.paginate(PaginationContext::finalized(discovery.len()));
        assert_eq!(discovery.len(), done.len());
    }

    #[test]
    fn test_final_pass_headers_carry_real_totals() {
        let mut b = ReportBuilder::new(header());
        b.add_section(big_table(200));
        let total = b.paginate(PaginationContext::discovery()).len();
        let pages = b.paginate(PaginationContext::finalized(total));
        for (i, page) in pages.iter().enumerate() {
            let expected = format!("Página {} de {}", i + 1, total);
            assert!(
                page.text_content().iter().any(|t| *t == expected),
                "page {} lacks '{}'",
                i + 1,
                expected
            );
        }
    }

    #[test]
    fn test_no_overflow_on_ordinary_report() {
        let mut b = ReportBuilder::new(header());
        b.add_section(big_table(80));
        let pages = b.paginate(PaginationContext::discovery());
        assert_eq!(pages.iter().map(Surface::overflow_events).sum::<u32>(), 0);
    }
}
