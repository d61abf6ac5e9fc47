//! PDF 1.7 serialization.
//!
//! Recorded page surfaces become one content stream per page, compressed
//! with FlateDecode. Only the four Helvetica Type1 standard fonts are
//! referenced, so no font programs are embedded. This is the only module
//! that knows PDF syntax, and the only place where the engine's top-down
//! y axis is flipped into PDF's bottom-up one.

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::StandardFont;
use crate::style::Color;
use crate::surface::{DrawOp, Surface};

const COMPRESSION_LEVEL: u8 = 6;

/// Metadata for the document Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// Serializes recorded pages into a PDF byte stream.
pub struct PdfWriter {
    info: DocumentInfo,
}

impl PdfWriter {
    pub fn new(info: DocumentInfo) -> Self {
        Self { info }
    }

    pub fn render(&self, pages: &[Surface]) -> Vec<u8> {
        let alphas = collect_alphas(pages);

        let mut objects: Vec<Vec<u8>> = Vec::new();
        fn add(body: Vec<u8>, objects: &mut Vec<Vec<u8>>) -> usize {
            objects.push(body);
            objects.len()
        }

        // Object ids are assigned up front: catalog, pages tree, the four
        // font objects, one ExtGState per distinct alpha, then page and
        // content pairs.
        let catalog_id = 1;
        let pages_id = 2;
        let first_font_id = 3;
        let first_gs_id = first_font_id + StandardFont::ALL.len();
        let first_page_id = first_gs_id + alphas.len();

        add(
            format!("<< /Type /Catalog /Pages {pages_id} 0 R >>").into_bytes(),
            &mut objects,
        );

        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", first_page_id + 2 * i))
            .collect();
        add(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            )
            .into_bytes(),
            &mut objects,
        );

        for font in StandardFont::ALL {
            add(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                )
                .into_bytes(),
                &mut objects,
            );
        }

        for alpha in &alphas {
            let a = *alpha as f64 / 1000.0;
            add(
                format!("<< /Type /ExtGState /ca {a:.3} /CA {a:.3} >>").into_bytes(),
                &mut objects,
            );
        }

        let resources = resources_dict(first_font_id, first_gs_id, &alphas);
        for (i, page) in pages.iter().enumerate() {
            let page_id = first_page_id + 2 * i;
            let content_id = page_id + 1;
            add(
                format!(
                    "<< /Type /Page /Parent {pages_id} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Resources {resources} /Contents {content_id} 0 R >>",
                    page.width, page.height
                )
                .into_bytes(),
                &mut objects,
            );

            let stream = content_stream(page);
            let compressed = compress_to_vec_zlib(&stream, COMPRESSION_LEVEL);
            let mut body = format!(
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            )
            .into_bytes();
            body.extend_from_slice(&compressed);
            body.extend_from_slice(b"\nendstream");
            add(body, &mut objects);
        }

        let info_id = add(
            format!(
                "<< /Title {} /Author {} /Producer (relato) >>",
                literal_string(&self.info.title),
                literal_string(&self.info.author)
            )
            .into_bytes(),
            &mut objects,
        );

        serialize(objects, catalog_id, info_id)
    }
}

/// Distinct non-opaque alpha values across all pages, as per-mille keys.
fn collect_alphas(pages: &[Surface]) -> Vec<u32> {
    let mut alphas: Vec<u32> = Vec::new();
    let mut note = |color: &Color, alphas: &mut Vec<u32>| {
        if color.a < 1.0 {
            let key = (color.a * 1000.0).round() as u32;
            if !alphas.contains(&key) {
                alphas.push(key);
            }
        }
    };
    for page in pages {
        for op in page.ops() {
            match op {
                DrawOp::Rect { color, .. }
                | DrawOp::Polygon { color, .. }
                | DrawOp::TextLine { color, .. } => note(color, &mut alphas),
                DrawOp::Boundary { .. } => {}
            }
        }
    }
    alphas.sort_unstable();
    alphas
}

fn resources_dict(first_font_id: usize, first_gs_id: usize, alphas: &[u32]) -> String {
    let fonts: Vec<String> = StandardFont::ALL
        .iter()
        .map(|f| format!("/F{} {} 0 R", f.resource_index(), first_font_id + f.resource_index()))
        .collect();
    let mut dict = format!("<< /Font << {} >>", fonts.join(" "));
    if !alphas.is_empty() {
        let states: Vec<String> = alphas
            .iter()
            .enumerate()
            .map(|(i, key)| format!("/GS{key} {} 0 R", first_gs_id + i))
            .collect();
        dict.push_str(&format!(" /ExtGState << {} >>", states.join(" ")));
    }
    dict.push_str(" >>");
    dict
}

fn gs_op(color: &Color, out: &mut String) {
    if color.a < 1.0 {
        let key = (color.a * 1000.0).round() as u32;
        out.push_str(&format!("/GS{key} gs\n"));
    }
}

/// Generate one page's uncompressed content stream. The y flip happens
/// here: `pdf_y = page_height - y`.
fn content_stream(page: &Surface) -> Vec<u8> {
    let h = page.height;
    let mut out = String::new();
    for op in page.ops() {
        match op {
            DrawOp::Rect { rect, color } => {
                out.push_str("q\n");
                gs_op(color, &mut out);
                out.push_str(&format!(
                    "{:.4} {:.4} {:.4} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                    color.r,
                    color.g,
                    color.b,
                    rect.x,
                    h - rect.bottom(),
                    rect.width,
                    rect.height
                ));
            }
            DrawOp::Polygon { points, color } => {
                out.push_str("q\n");
                gs_op(color, &mut out);
                out.push_str(&format!("{:.4} {:.4} {:.4} rg\n", color.r, color.g, color.b));
                for (i, (x, y)) in points.iter().enumerate() {
                    let op_code = if i == 0 { "m" } else { "l" };
                    out.push_str(&format!("{x:.2} {:.2} {op_code}\n", h - y));
                }
                out.push_str("f\nQ\n");
            }
            DrawOp::TextLine {
                x,
                y,
                text,
                font,
                size,
                color,
            } => {
                out.push_str("q\nBT\n");
                gs_op(color, &mut out);
                out.push_str(&format!(
                    "/F{} {size:.2} Tf\n{:.4} {:.4} {:.4} rg\n{x:.2} {:.2} Td\n",
                    font.resource_index(),
                    color.r,
                    color.g,
                    color.b,
                    h - y
                ));
                out.push_str(&literal_string(text));
                out.push_str(" Tj\nET\nQ\n");
            }
            DrawOp::Boundary { rect } => {
                out.push_str(&format!(
                    "q\n1 0 0 RG\n0.5 w\n{:.2} {:.2} {:.2} {:.2} re\nS\nQ\n",
                    rect.x,
                    h - rect.bottom(),
                    rect.width,
                    rect.height
                ));
            }
        }
    }
    out.into_bytes()
}

/// A PDF literal string in WinAnsi bytes. Characters past Latin-1 are
/// replaced, matching the metrics fallback.
fn literal_string(text: &str) -> String {
    let mut out = String::from("(");
    for ch in text.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            _ => {
                let code = ch as u32;
                if code < 0x80 {
                    out.push(ch);
                } else if code <= 0xFF {
                    out.push_str(&format!("\\{:03o}", code));
                } else {
                    out.push('?');
                }
            }
        }
    }
    out.push(')');
    out
}

/// Lay the objects out with an xref table and trailer.
fn serialize(objects: Vec<Vec<u8>>, catalog_id: usize, info_id: usize) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {catalog_id} 0 R /Info {info_id} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}
