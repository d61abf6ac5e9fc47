//! Standard-font metrics.
//!
//! The report uses the Helvetica family of standard PDF fonts, which need
//! no embedding: a PDF viewer resolves them by name. Widths come from the
//! Adobe AFM tables (1000 units per em) for the printable ASCII range;
//! characters outside the table fall back to the lowercase advance, which
//! keeps wrapping deterministic for accented Latin text.

/// The standard fonts the engine can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

/// Helvetica AFM advance widths for chars 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold AFM advance widths for chars 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl StandardFont {
    /// The PDF BaseFont name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Resource index used for the /F0../F3 font dictionary names.
    pub fn resource_index(&self) -> usize {
        match self {
            Self::Helvetica => 0,
            Self::HelveticaBold => 1,
            Self::HelveticaOblique => 2,
            Self::HelveticaBoldOblique => 3,
        }
    }

    pub const ALL: [StandardFont; 4] = [
        Self::Helvetica,
        Self::HelveticaBold,
        Self::HelveticaOblique,
        Self::HelveticaBoldOblique,
    ];

    fn width_table(&self) -> &'static [u16; 95] {
        match self {
            Self::Helvetica | Self::HelveticaOblique => &HELVETICA_WIDTHS,
            Self::HelveticaBold | Self::HelveticaBoldOblique => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of a single character in points at `font_size`.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let table = self.width_table();
        let units = match ch as u32 {
            32..=126 => table[(ch as usize) - 32],
            // Accented Latin and anything else: lowercase advance.
            _ => table[(b'o' as usize) - 32],
        };
        units as f64 / 1000.0 * font_size
    }

    /// Width of a string in points at `font_size`.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}
