//! Paginated credit-report rendering.
//!
//! The crate turns a structured report description (a page header plus a
//! sequence of typed sections) into a print-ready A4 PDF. Layout is
//! component based: every section becomes a measurable flow element, a
//! two-pass pagination engine places the elements across pages (so every
//! header can carry the real "page N of TOTAL" line), and the recorded
//! pages are serialized to PDF at the end.
//!
//! ```no_run
//! use relato::{HeaderData, ReportBuilder, SectionComponent};
//!
//! let mut builder = ReportBuilder::new(HeaderData::default());
//! builder.add_section(SectionComponent::List {
//!     title: "Identification".to_string(),
//!     data: Default::default(),
//! });
//! let pdf = builder.build()?;
//! std::fs::write("report.pdf", pdf)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod components;
pub mod error;
pub mod flow;
pub mod font;
pub mod geometry;
pub mod icon;
pub mod model;
pub mod pagination;
pub mod pdf;
pub mod style;
pub mod surface;
pub mod text;

pub use error::ReportError;
pub use model::{HeaderData, ReportDocument, SectionComponent};
pub use pagination::{BuildOptions, ReportBuilder};

/// Render a JSON report description straight to PDF bytes.
pub fn render_json(json: &str, options: BuildOptions) -> Result<Vec<u8>, ReportError> {
    let document: ReportDocument = serde_json::from_str(json)?;
    render_document(document, options)
}

/// Render an already-parsed report description.
pub fn render_document(
    document: ReportDocument,
    options: BuildOptions,
) -> Result<Vec<u8>, ReportError> {
    let mut builder = ReportBuilder::new(document.header).with_options(options);
    for section in document.sections {
        builder.add_section(section);
    }
    builder.build()
}
