use crate::scoring::{Item, ScoreRange};
use crate::Questionnaire;

/// Mini Fear-Avoidance Beliefs Questionnaire, physical-activity items.
/// Each item rated 0–6 (completely disagree to completely agree).
/// Higher totals indicate stronger fear-avoidance beliefs.
pub struct MiniFabq;

impl Questionnaire for MiniFabq {
    fn id(&self) -> &str {
        "mini_fabq"
    }

    fn name(&self) -> &str {
        "Mini-FABQ"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            let agreement = ScoreRange::new(0, 6);
            vec![
                Item::numeric("fabq1", "My pain was caused by physical activity.", agreement),
                Item::numeric("fabq2", "Physical activity might harm my back.", agreement),
            ]
        });
        &ITEMS
    }
}
