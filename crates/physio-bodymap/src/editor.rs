use physio_core::models::body_map::{
    AreaId, BodyView, Intensity, MarkedArea, Sensation, SensationType,
};
use physio_core::models::geometry::Point;
use physio_core::models::screening::PainMapping;

use crate::capture::CaptureSession;
use crate::render::AreaShape;
use crate::store::{MarkedAreaStore, DEFAULT_HISTORY_LIMIT};
use crate::transform::{self, PointerEvent, ScreenTransform};

/// The pain-mapping step: current view and sensation, the shape being
/// drawn, and the areas already marked.
#[derive(Debug, Clone)]
pub struct PainMapEditor {
    view: BodyView,
    sensation: Sensation,
    capture: CaptureSession,
    store: MarkedAreaStore,
}

impl PainMapEditor {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            view: BodyView::default(),
            sensation: Sensation::default(),
            capture: CaptureSession::new(),
            store: MarkedAreaStore::with_history_limit(history_limit),
        }
    }

    /// Resume editing a saved pain-mapping slice.
    pub fn from_pain_mapping(mapping: &PainMapping, history_limit: usize) -> Self {
        Self {
            store: MarkedAreaStore::from_areas(mapping.pain_areas.clone(), history_limit),
            ..Self::with_history_limit(history_limit)
        }
    }

    pub fn view(&self) -> BodyView {
        self.view
    }

    /// Switching view abandons any shape in progress.
    pub fn set_view(&mut self, view: BodyView) {
        if view != self.view {
            self.capture.cancel();
            self.view = view;
        }
    }

    pub fn sensation(&self) -> Sensation {
        self.sensation
    }

    pub fn select_sensation_type(&mut self, sensation_type: SensationType) {
        self.sensation.sensation_type = sensation_type;
    }

    pub fn set_intensity(&mut self, intensity: u8) {
        self.sensation.intensity = Intensity::clamped(intensity);
    }

    /// Map the event and start or extend the current shape. Events that
    /// cannot be mapped are dropped.
    pub fn pointer_down(&mut self, event: &PointerEvent, surface: Option<&ScreenTransform>) {
        if let Some(point) = transform::to_logical(surface, event) {
            self.capture.push(point);
        }
    }

    /// Add a vertex already in logical space.
    pub fn push_point(&mut self, point: Point) {
        self.capture.push(point);
    }

    /// Close the current shape. Returns the new area's id, or `None` if the
    /// shape was discarded or nothing was being drawn.
    pub fn finish_shape(&mut self) -> Option<AreaId> {
        let area = self.capture.finish(self.view, self.sensation)?;
        let id = area.id();
        self.store.add(area);
        Some(id)
    }

    pub fn cancel_shape(&mut self) {
        self.capture.cancel();
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_active()
    }

    pub fn pending_points(&self) -> &[Point] {
        self.capture.points()
    }

    /// Clicking a finished area removes it.
    pub fn click_area(&mut self, id: AreaId) -> Option<MarkedArea> {
        self.store.remove_by_id(id)
    }

    /// Remove the top-most area under `point` on the current view.
    pub fn click_at(&mut self, point: Point) -> Option<MarkedArea> {
        let id = self.store.hit_test(self.view, point)?;
        self.click_area(id)
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn reset_all(&mut self) {
        self.store.reset_all();
    }

    pub fn store(&self) -> &MarkedAreaStore {
        &self.store
    }

    /// Shapes to draw for the current view, bottom first.
    pub fn shapes(&self) -> Vec<AreaShape> {
        self.store.list_by_view(self.view).map(AreaShape::from).collect()
    }

    /// The step-3 data slice.
    pub fn to_pain_mapping(&self, pain_narrative: impl Into<String>) -> PainMapping {
        PainMapping {
            pain_areas: self.store.areas().to_vec(),
            pain_narrative: pain_narrative.into(),
        }
    }
}

impl Default for PainMapEditor {
    fn default() -> Self {
        Self::new()
    }
}
