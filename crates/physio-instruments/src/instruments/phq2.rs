use crate::scoring::Item;
use crate::{Questionnaire, Responses};

/// A PHQ-2 total at or above this is a positive depression screen.
pub const POSITIVE_SCREEN_THRESHOLD: u8 = 3;

/// PHQ-2: two-item mood screen over the last two weeks, each 0–3.
pub struct Phq2;

impl Phq2 {
    pub fn is_positive(&self, responses: &Responses) -> bool {
        self.score(responses)
            .is_some_and(|total| total >= POSITIVE_SCREEN_THRESHOLD)
    }
}

impl Questionnaire for Phq2 {
    fn id(&self) -> &str {
        "phq2"
    }

    fn name(&self) -> &str {
        "PHQ-2"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            let frequency = [
                "Not at all",
                "Several days",
                "More than half the days",
                "Nearly every day",
            ];
            vec![
                Item::labelled(
                    "phq1",
                    "Over the last 2 weeks, how often have you been bothered by having little interest or pleasure in doing things?",
                    &frequency,
                ),
                Item::labelled(
                    "phq2",
                    "Over the last 2 weeks, how often have you been bothered by feeling down, depressed, or hopeless?",
                    &frequency,
                ),
            ]
        });
        &ITEMS
    }
}
