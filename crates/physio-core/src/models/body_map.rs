use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::geometry::Point;
use crate::error::CoreError;

/// Which body silhouette a shape was drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BodyView {
    #[default]
    Front,
    Back,
}

/// Quality of a symptom marked on the body chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SensationType {
    #[default]
    Pain,
    Numbness,
    Tingling,
    Burning,
    Heaviness,
    Tightness,
}

impl SensationType {
    pub const ALL: [SensationType; 6] = [
        Self::Pain,
        Self::Numbness,
        Self::Tingling,
        Self::Burning,
        Self::Heaviness,
        Self::Tightness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pain => "Pain",
            Self::Numbness => "Numbness",
            Self::Tingling => "Tingling",
            Self::Burning => "Burning",
            Self::Heaviness => "Heaviness",
            Self::Tightness => "Tightness",
        }
    }

    /// Legend color for this sensation. Marked areas always use this.
    pub fn color(&self) -> HslColor {
        match self {
            Self::Pain => HslColor::new(0, 90, 60),
            Self::Numbness => HslColor::new(200, 90, 60),
            Self::Tingling => HslColor::new(50, 90, 60),
            Self::Burning => HslColor::new(30, 90, 60),
            Self::Heaviness => HslColor::new(240, 30, 50),
            Self::Tightness => HslColor::new(300, 50, 50),
        }
    }
}

/// An HSL color. Saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HslColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl HslColor {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Symptom intensity on a 0–10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export, type = "number")]
pub struct Intensity(u8);

impl Intensity {
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX {
            return Err(CoreError::IntensityOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Like [`Intensity::new`] but saturates at the top of the scale.
    pub fn clamped(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Intensity {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The sensation currently selected in the drawing controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sensation {
    pub sensation_type: SensationType,
    pub intensity: Intensity,
}

impl Default for Sensation {
    fn default() -> Self {
        Self {
            sensation_type: SensationType::Pain,
            intensity: Intensity(7),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, type = "string")]
pub struct AreaId(Uuid);

impl AreaId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AreaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "area-{}", self.0)
    }
}

/// A user-drawn closed polygon tagged with a sensation.
///
/// The path is stored open; the closing edge from the last point back to
/// the first is implied wherever the shape is rendered or hit-tested.
/// `color` is always derived from `sensation_type` and is ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(try_from = "MarkedAreaFields")]
#[ts(export)]
pub struct MarkedArea {
    id: AreaId,
    path: Vec<Point>,
    view: BodyView,
    sensation_type: SensationType,
    intensity: Intensity,
    color: HslColor,
}

impl MarkedArea {
    pub const MIN_POINTS: usize = 3;

    pub fn new(path: Vec<Point>, view: BodyView, sensation: Sensation) -> Result<Self, CoreError> {
        Self::with_id(AreaId::new(), path, view, sensation)
    }

    pub fn with_id(
        id: AreaId,
        path: Vec<Point>,
        view: BodyView,
        sensation: Sensation,
    ) -> Result<Self, CoreError> {
        if path.len() < Self::MIN_POINTS {
            return Err(CoreError::DegeneratePolygon(path.len()));
        }
        Ok(Self {
            id,
            path,
            view,
            sensation_type: sensation.sensation_type,
            intensity: sensation.intensity,
            color: sensation.sensation_type.color(),
        })
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn view(&self) -> BodyView {
        self.view
    }

    pub fn sensation_type(&self) -> SensationType {
        self.sensation_type
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn color(&self) -> HslColor {
        self.color
    }

    /// Even-odd ray casting against the implicitly closed path.
    pub fn contains(&self, point: Point) -> bool {
        let n = self.path.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.path[i];
            let vj = self.path[j];
            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[derive(Deserialize)]
struct MarkedAreaFields {
    id: AreaId,
    path: Vec<Point>,
    view: BodyView,
    sensation_type: SensationType,
    intensity: Intensity,
}

impl TryFrom<MarkedAreaFields> for MarkedArea {
    type Error = CoreError;

    fn try_from(raw: MarkedAreaFields) -> Result<Self, Self::Error> {
        Self::with_id(
            raw.id,
            raw.path,
            raw.view,
            Sensation {
                sensation_type: raw.sensation_type,
                intensity: raw.intensity,
            },
        )
    }
}
