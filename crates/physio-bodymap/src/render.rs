//! SVG attribute strings for marked areas and the in-progress stroke.
//!
//! Opacity is a presentation concern: it is computed here from the stored
//! color and intensity and never written back into the data model.

use std::fmt::Write;

use physio_core::models::body_map::{HslColor, Intensity, MarkedArea};
use physio_core::models::geometry::Point;

/// Fill alpha at full intensity, out of 255.
const MAX_FILL_ALPHA: f64 = 200.0;

/// `d` attribute for a closed path: `M x,y L x,y ... Z`.
pub fn path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{},{}", p.x, p.y);
    }
    if !points.is_empty() {
        d.push_str(" Z");
    }
    d
}

/// `points` attribute for the open polyline of a shape being drawn.
pub fn polyline_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fill opacity in [0, 1] for an intensity, quantized to a byte.
pub fn fill_alpha(intensity: Intensity) -> f64 {
    let byte = (f64::from(intensity.value()) / f64::from(Intensity::MAX) * MAX_FILL_ALPHA).round();
    byte / 255.0
}

pub fn fill_style(color: HslColor, intensity: Intensity) -> String {
    format!(
        "hsla({}, {}%, {}%, {:.3})",
        color.hue,
        color.saturation,
        color.lightness,
        fill_alpha(intensity)
    )
}

pub fn stroke_style(color: HslColor) -> String {
    color.to_string()
}

/// Accessible label for a rendered area.
pub fn aria_label(area: &MarkedArea) -> String {
    format!(
        "Marked area for {} with intensity {}",
        area.sensation_type().label(),
        area.intensity()
    )
}

/// Everything the surface needs to draw one area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaShape {
    pub id: String,
    pub d: String,
    pub fill: String,
    pub stroke: String,
    pub label: String,
}

impl From<&MarkedArea> for AreaShape {
    fn from(area: &MarkedArea) -> Self {
        Self {
            id: area.id().to_string(),
            d: path_data(area.path()),
            fill: fill_style(area.color(), area.intensity()),
            stroke: stroke_style(area.color()),
            label: aria_label(area),
        }
    }
}
