use std::collections::VecDeque;

use physio_core::models::body_map::{AreaId, BodyView, MarkedArea};
use physio_core::models::geometry::Point;

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Ordered collection of marked areas with a snapshot undo history.
///
/// Every mutation pushes a full copy of the collection as it was before the
/// change, so `undo` restores exactly the previous state in LIFO order.
/// When the history is full the oldest snapshot is dropped.
#[derive(Debug, Clone)]
pub struct MarkedAreaStore {
    areas: Vec<MarkedArea>,
    history: VecDeque<Vec<MarkedArea>>,
    history_limit: usize,
}

impl MarkedAreaStore {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            areas: Vec::new(),
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// Start from previously saved areas, with an empty history.
    pub fn from_areas(areas: Vec<MarkedArea>, history_limit: usize) -> Self {
        Self {
            areas,
            history: VecDeque::new(),
            history_limit,
        }
    }

    pub fn add(&mut self, area: MarkedArea) {
        self.record();
        tracing::debug!(id = %area.id(), view = ?area.view(), "marked area added");
        self.areas.push(area);
    }

    /// Remove the area with `id`. History is recorded even when nothing
    /// matches, so each call is undone by exactly one `undo`.
    pub fn remove_by_id(&mut self, id: AreaId) -> Option<MarkedArea> {
        self.record();
        let index = self.areas.iter().position(|a| a.id() == id)?;
        Some(self.areas.remove(index))
    }

    pub fn reset_all(&mut self) {
        self.record();
        self.areas.clear();
    }

    /// Restore the collection as it was before the latest mutation.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.areas = previous;
                true
            }
            None => false,
        }
    }

    pub fn areas(&self) -> &[MarkedArea] {
        &self.areas
    }

    /// Areas drawn on `view`, in insertion order (later ones draw on top).
    pub fn list_by_view(&self, view: BodyView) -> impl Iterator<Item = &MarkedArea> {
        self.areas.iter().filter(move |a| a.view() == view)
    }

    /// The top-most area on `view` containing `point`.
    pub fn hit_test(&self, view: BodyView, point: Point) -> Option<AreaId> {
        self.areas
            .iter()
            .rev()
            .find(|a| a.view() == view && a.contains(point))
            .map(|a| a.id())
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn into_areas(self) -> Vec<MarkedArea> {
        self.areas
    }

    fn record(&mut self) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(self.areas.clone());
    }
}

impl Default for MarkedAreaStore {
    fn default() -> Self {
        Self::new()
    }
}
