//! Colors and text styles.
//!
//! Styles are immutable records: a derived style is produced through the
//! `with_*` builders rather than by mutating a shared object, so a style
//! handed to two primitives can never drift between them.

use crate::font::StandardFont;
use serde::{Deserialize, Serialize};

/// An RGBA color, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// The report palette.
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// 70% black, used for captions.
    pub const BLACK_70: Color = Color::rgb(0.302, 0.302, 0.302);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.902, 0.902, 0.902);
    pub const DARK_GRAY: Color = Color::rgb(0.702, 0.702, 0.702);
    pub const RED: Color = Color::rgb(0.882, 0.212, 0.333);
    pub const ORANGE: Color = Color::rgb(0.945, 0.592, 0.373);
    pub const GREEN: Color = Color::rgb(0.608, 0.706, 0.376);
    pub const BLUE: Color = Color::rgb(0.278, 0.604, 0.682);

    pub const DARK_ORANGE: Color = Color::rgb(0.475, 0.298, 0.188);
    pub const DARK_GREEN: Color = Color::rgb(0.306, 0.353, 0.188);
}

/// Text color that keeps contrast on a tinted background: white text on
/// the dark tints, black everywhere else.
pub fn text_color_on(background: Color) -> Color {
    if background == palette::BLACK || background == palette::RED {
        palette::WHITE
    } else {
        palette::BLACK
    }
}

/// Icon tint on a tinted card background. The warm tints get their darker
/// counterpart so the glyph stays visible.
pub fn icon_color_on(background: Color) -> Color {
    if background == palette::BLACK || background == palette::RED {
        palette::WHITE
    } else if background == palette::ORANGE {
        palette::DARK_ORANGE
    } else if background == palette::GREEN {
        palette::DARK_GREEN
    } else {
        background
    }
}

/// Horizontal alignment inside a wrapped paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// An immutable paragraph style record.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size: f64,
    pub color: Color,
    pub align: Align,
    /// Baseline-to-baseline distance. Defaults to `size * 1.2`.
    pub leading: f64,
}

impl TextStyle {
    pub fn new(font: StandardFont, size: f64) -> Self {
        Self {
            font,
            size,
            color: Color::BLACK,
            align: Align::Left,
            leading: size * 1.2,
        }
    }

    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    pub fn with_align(&self, align: Align) -> Self {
        Self {
            align,
            ..self.clone()
        }
    }

    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            leading: size * 1.2,
            ..self.clone()
        }
    }
}

/// The report's named styles: a bold
/// title, a bold subtitle, body text, and two caption weights, each with
/// alignment variants derived on demand.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub body: TextStyle,
    pub body_bold: TextStyle,
    pub caption: TextStyle,
    pub caption_70: TextStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    pub fn new() -> Self {
        Self {
            title: TextStyle::new(StandardFont::HelveticaBold, 12.0),
            subtitle: TextStyle::new(StandardFont::HelveticaBold, 10.0),
            body: TextStyle::new(StandardFont::Helvetica, 9.0),
            body_bold: TextStyle::new(StandardFont::HelveticaBold, 9.0),
            caption: TextStyle::new(StandardFont::Helvetica, 8.0),
            caption_70: TextStyle::new(StandardFont::Helvetica, 8.0)
                .with_color(palette::BLACK_70),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Color::hex("#E13655");
        assert!((c.r - 0xE1 as f64 / 255.0).abs() < 0.001);
        assert!((c.g - 0x36 as f64 / 255.0).abs() < 0.001);
        assert!((c.b - 0x55 as f64 / 255.0).abs() < 0.001);

        let c = Color::hex("abc");
        assert!((c.r - 0xAA as f64 / 255.0).abs() < 0.001);
    }

    #[test]
    fn test_contrast_table() {
        assert_eq!(text_color_on(palette::RED), palette::WHITE);
        assert_eq!(text_color_on(palette::BLACK), palette::WHITE);
        assert_eq!(text_color_on(palette::ORANGE), palette::BLACK);
        assert_eq!(text_color_on(palette::GREEN), palette::BLACK);
        assert_eq!(text_color_on(palette::GRAY), palette::BLACK);
    }

    #[test]
    fn test_icon_tints() {
        assert_eq!(icon_color_on(palette::ORANGE), palette::DARK_ORANGE);
        assert_eq!(icon_color_on(palette::GREEN), palette::DARK_GREEN);
        assert_eq!(icon_color_on(palette::RED), palette::WHITE);
        assert_eq!(icon_color_on(palette::BLUE), palette::BLUE);
    }

    #[test]
    fn test_with_overrides_do_not_mutate() {
        let base = TextStyle::new(StandardFont::Helvetica, 9.0);
        let right = base.with_align(Align::Right);
        assert_eq!(base.align, Align::Left);
        assert_eq!(right.align, Align::Right);
        assert_eq!(right.size, base.size);
    }

    #[test]
    fn test_with_size_rescales_leading() {
        let s = TextStyle::new(StandardFont::Helvetica, 10.0).with_size(20.0);
        assert!((s.leading - 24.0).abs() < 1e-9);
    }
}
