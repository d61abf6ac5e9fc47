//! Vector icon assets.
//!
//! Icons are built-in polygon sets in a 24×24 design box, recolored and
//! rescaled at draw time. Lookup is by name and tolerant: an unknown name
//! renders nothing and logs a warning, so one bad icon reference never
//! aborts a report.

use crate::geometry::Size;
use crate::style::Color;
use crate::surface::Surface;
use tracing::warn;

const DESIGN_BOX: f64 = 24.0;

/// The assets shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconAsset {
    Check,
    Warning,
    Error,
    /// Single gauge glyph, drawn in a row of three by the gauge widget.
    Gauge,
}

impl IconAsset {
    /// Tolerant by-name lookup.
    pub fn resolve(name: &str) -> Option<IconAsset> {
        match name {
            "check" => Some(Self::Check),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "gauge" => Some(Self::Gauge),
            _ => None,
        }
    }

    /// Closed polygons in the 24×24 design box, y down.
    fn polygons(&self) -> Vec<Vec<(f64, f64)>> {
        match self {
            // Checkmark stroke as a closed outline.
            Self::Check => vec![vec![
                (3.0, 13.0),
                (6.0, 10.0),
                (10.0, 14.0),
                (18.0, 5.0),
                (21.0, 8.0),
                (10.0, 20.0),
            ]],
            // Triangle with a cut-out exclamation drawn on top.
            Self::Warning => vec![
                vec![(12.0, 2.0), (23.0, 21.0), (1.0, 21.0)],
                vec![(11.0, 8.0), (13.0, 8.0), (13.0, 14.0), (11.0, 14.0)],
                vec![(11.0, 16.0), (13.0, 16.0), (13.0, 18.0), (11.0, 18.0)],
            ],
            // Octagon plus an X.
            Self::Error => vec![
                vec![
                    (7.0, 1.0),
                    (17.0, 1.0),
                    (23.0, 7.0),
                    (23.0, 17.0),
                    (17.0, 23.0),
                    (7.0, 23.0),
                    (1.0, 17.0),
                    (1.0, 7.0),
                ],
                vec![(8.0, 6.0), (12.0, 10.0), (16.0, 6.0), (18.0, 8.0), (14.0, 12.0), (18.0, 16.0), (16.0, 18.0), (12.0, 14.0), (8.0, 18.0), (6.0, 16.0), (10.0, 12.0), (6.0, 8.0)],
            ],
            // Speedometer-ish wedge.
            Self::Gauge => vec![vec![
                (12.0, 2.0),
                (22.0, 12.0),
                (18.0, 22.0),
                (6.0, 22.0),
                (2.0, 12.0),
            ]],
        }
    }
}

/// Scale anchor: exactly one of width or height drives the scale factor,
/// the other follows the design-box aspect ratio (which is square, so
/// they coincide for built-in assets).
#[derive(Debug, Clone, Copy)]
pub enum IconScale {
    Width(f64),
    Height(f64),
}

/// A placeable, tinted icon.
#[derive(Debug, Clone)]
pub struct Icon {
    asset: Option<IconAsset>,
    scale: IconScale,
    tint: Color,
    opacity: f64,
}

impl Icon {
    pub fn new(asset: IconAsset, scale: IconScale, tint: Color, opacity: f64) -> Self {
        Self {
            asset: Some(asset),
            scale,
            tint,
            opacity,
        }
    }

    /// Resolve by name; unknown names produce an icon that draws nothing.
    pub fn named(name: &str, scale: IconScale, tint: Color, opacity: f64) -> Self {
        let asset = IconAsset::resolve(name);
        if asset.is_none() {
            warn!(icon = name, "unknown icon asset, rendering nothing");
        }
        Self {
            asset,
            scale,
            tint,
            opacity,
        }
    }

    fn factor(&self) -> f64 {
        match self.scale {
            IconScale::Width(w) => w / DESIGN_BOX,
            IconScale::Height(h) => h / DESIGN_BOX,
        }
    }

    pub fn size(&self) -> Size {
        let f = self.factor();
        Size::new(DESIGN_BOX * f, DESIGN_BOX * f)
    }

    pub fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let Some(asset) = self.asset else {
            return;
        };
        let f = self.factor();
        let color = self.tint.with_alpha(self.tint.a * self.opacity);
        for poly in asset.polygons() {
            let points = poly
                .into_iter()
                .map(|(px, py)| (x + px * f, y + py * f))
                .collect();
            surface.fill_polygon(points, color);
        }
    }
}
