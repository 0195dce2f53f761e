use physio_core::models::body_map::{BodyView, MarkedArea, Sensation};
use physio_core::models::geometry::Point;

/// Vertices of one freehand shape while it is being drawn.
///
/// The first pointer-down starts the shape; each later one appends a
/// vertex. Finishing closes the shape, or discards it when it has fewer
/// than three vertices (an accidental click is not an error).
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    points: Vec<Point>,
    active: bool,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Start a shape at `point`. Returns false, changing nothing, if a
    /// shape is already in progress.
    pub fn begin(&mut self, point: Point) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.points.clear();
        self.points.push(point);
        true
    }

    /// Append a vertex. Ignored when no shape is in progress.
    pub fn add_vertex(&mut self, point: Point) {
        if self.active {
            self.points.push(point);
        }
    }

    /// Begin a shape, or extend the current one.
    pub fn push(&mut self, point: Point) {
        if !self.begin(point) {
            self.add_vertex(point);
        }
    }

    /// Close the current shape and tag it for `view` with `sensation`.
    ///
    /// Always leaves the session inactive and empty. Returns `None` when
    /// nothing was in progress or the shape was degenerate.
    pub fn finish(&mut self, view: BodyView, sensation: Sensation) -> Option<MarkedArea> {
        if !self.active {
            return None;
        }
        self.active = false;
        let points = std::mem::take(&mut self.points);
        if points.len() < MarkedArea::MIN_POINTS {
            tracing::debug!(vertices = points.len(), "discarding degenerate shape");
            return None;
        }
        MarkedArea::new(points, view, sensation).ok()
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.points.clear();
    }
}
