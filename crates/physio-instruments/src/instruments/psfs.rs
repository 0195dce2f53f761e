use physio_core::models::screening::PsfsItem;

use crate::scoring::{ScoreRange, ScoreType, ValidationError};

/// Patient-Specific Functional Scale.
///
/// The patient names up to three activities they struggle with and rates
/// their current ability at each, 0 (cannot do) to 10 (as before). The
/// score is the mean rating.
pub struct Psfs;

impl Psfs {
    pub const MAX_ITEMS: usize = 3;
    pub const RATING: ScoreRange = ScoreRange::new(0, 10);
    /// Rating a freshly added activity starts at.
    pub const DEFAULT_RATING: u8 = 5;

    pub fn id(&self) -> &str {
        "psfs"
    }

    pub fn name(&self) -> &str {
        "PSFS"
    }

    pub fn score_type(&self) -> ScoreType {
        ScoreType::Mean
    }

    /// Append an empty activity. Returns false once the list is full.
    pub fn add_item(&self, items: &mut Vec<PsfsItem>) -> bool {
        if items.len() >= Self::MAX_ITEMS {
            return false;
        }
        items.push(PsfsItem {
            activity: String::new(),
            rating: Self::DEFAULT_RATING,
        });
        true
    }

    pub fn validate(&self, items: &[PsfsItem]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let item_id = format!("activity_{}", index + 1);
            if index >= Self::MAX_ITEMS {
                errors.push(ValidationError {
                    item_id,
                    value: item.rating,
                    expected_range: None,
                    message: format!(
                        "{}: at most {} activities may be listed",
                        self.name(),
                        Self::MAX_ITEMS
                    ),
                });
            } else if !Self::RATING.contains(item.rating) {
                errors.push(ValidationError {
                    message: format!(
                        "{}: rating {} for '{}' is outside range [{}, {}]",
                        self.name(),
                        item.rating,
                        item.activity,
                        Self::RATING.min,
                        Self::RATING.max,
                    ),
                    item_id,
                    value: item.rating,
                    expected_range: Some(Self::RATING),
                });
            }
        }
        errors
    }

    /// Mean rating, or `None` with no activities or any invalid entry.
    pub fn score(&self, items: &[PsfsItem]) -> Option<f64> {
        if items.is_empty() || !self.validate(items).is_empty() {
            return None;
        }
        let total: u32 = items.iter().map(|item| u32::from(item.rating)).sum();
        Some(f64::from(total) / items.len() as f64)
    }
}
