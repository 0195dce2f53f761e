use serde::{Deserialize, Serialize};
use ts_rs::TS;

use physio_core::models::geometry::Point;

/// The axis-aligned part of a surface's logical-to-viewport matrix,
/// named after the SVG `getScreenCTM()` components.
///
/// `viewport = (a * x + e, d * y + f)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreenTransform {
    pub a: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ScreenTransform {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Transform for a surface whose logical space is uniformly scaled by
    /// `scale` and whose origin sits at `(left, top)` in the viewport.
    pub fn scaled(scale: f64, left: f64, top: f64) -> Self {
        Self {
            a: scale,
            d: scale,
            e: left,
            f: top,
        }
    }

    /// Zero or non-finite scales make the matrix non-invertible.
    pub fn is_invertible(&self) -> bool {
        [self.a, self.d, self.e, self.f].iter().all(|v| v.is_finite())
            && self.a != 0.0
            && self.d != 0.0
    }

    pub fn to_logical(&self, client: Point) -> Option<Point> {
        if !self.is_invertible() || !client.is_finite() {
            return None;
        }
        Some(Point::new(
            (client.x - self.e) / self.a,
            (client.y - self.f) / self.d,
        ))
    }

    pub fn to_viewport(&self, logical: Point) -> Point {
        Point::new(self.a * logical.x + self.e, self.d * logical.y + self.f)
    }
}

/// A pointer-down as reported by the surface: a mouse position, or the
/// touches of a touch event (the first one is used).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum PointerEvent {
    Mouse { client_x: f64, client_y: f64 },
    Touch { touches: Vec<Point> },
}

impl PointerEvent {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self::Mouse { client_x, client_y }
    }

    pub fn client_position(&self) -> Option<Point> {
        match self {
            Self::Mouse { client_x, client_y } => Some(Point::new(*client_x, *client_y)),
            Self::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Map a pointer event into logical canvas space.
///
/// `None` means "ignore this event": the surface has no transform yet
/// (not mounted), the transform cannot be inverted, or the event has no
/// usable position.
pub fn to_logical(transform: Option<&ScreenTransform>, event: &PointerEvent) -> Option<Point> {
    let Some(transform) = transform else {
        tracing::debug!("no surface transform, dropping pointer event");
        return None;
    };
    let client = event.client_position()?;
    let logical = transform.to_logical(client);
    if logical.is_none() {
        tracing::debug!(?transform, "surface transform not invertible, dropping pointer event");
    }
    logical
}
