//! physio-instruments
//!
//! Screening questionnaire definitions. Pure data, no I/O.
//! Defines the items, response ranges, and scoring rules for each
//! questionnaire shown in the clinical-questionnaires step, plus the
//! safety-check question catalogue.

pub mod error;
pub mod instruments;
pub mod red_flags;
pub mod scoring;

use std::collections::BTreeMap;

use error::InstrumentError;
use scoring::{Item, ScoreRange, ScoreType, ValidationError};

/// Responses keyed by item id.
pub type Responses = BTreeMap<String, u8>;

/// Trait implemented by each summed-response questionnaire.
pub trait Questionnaire: Send + Sync {
    /// Unique identifier (e.g., "mini_fabq", "phq2").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Mini-FABQ", "PHQ-2").
    fn name(&self) -> &str;

    /// The questions, in display order.
    fn items(&self) -> &[Item];

    /// How the total is derived from the item responses.
    fn score_type(&self) -> ScoreType {
        ScoreType::Sum
    }

    /// Range of the total score.
    fn total_range(&self) -> ScoreRange {
        let (min, max) = self.items().iter().fold((0u8, 0u8), |(min, max), item| {
            (min.saturating_add(item.range.min), max.saturating_add(item.range.max))
        });
        ScoreRange::new(min, max)
    }

    /// Validate responses: unknown items and out-of-range values.
    fn validate(&self, responses: &Responses) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (item_id, &value) in responses {
            match self.items().iter().find(|item| &item.id == item_id) {
                None => errors.push(ValidationError {
                    item_id: item_id.clone(),
                    value,
                    expected_range: None,
                    message: format!("{}: unknown item '{item_id}'", self.name()),
                }),
                Some(item) if !item.range.contains(value) => errors.push(ValidationError {
                    item_id: item_id.clone(),
                    value,
                    expected_range: Some(item.range),
                    message: format!(
                        "{}: response {} to '{}' is outside range [{}, {}]",
                        self.name(),
                        value,
                        item.id,
                        item.range.min,
                        item.range.max,
                    ),
                }),
                Some(_) => {}
            }
        }
        errors
    }

    /// Total score. `None` unless every item has a valid response.
    fn score(&self, responses: &Responses) -> Option<u8> {
        let mut total: u32 = 0;
        for item in self.items() {
            let value = *responses.get(&item.id)?;
            if !item.range.contains(value) {
                return None;
            }
            total += u32::from(value);
        }
        u8::try_from(total).ok()
    }

    /// Format answered items as plain text for a report or console.
    fn to_structured_text(&self, responses: &Responses) -> String {
        let mut output = format!("## {}\n", self.name());
        for item in self.items() {
            if let Some(value) = responses.get(&item.id) {
                let label = item
                    .options
                    .iter()
                    .find(|o| o.value == *value)
                    .map(|o| o.label.as_str())
                    .unwrap_or("?");
                output.push_str(&format!("- {}: {} ({})\n", item.text, value, label));
            }
        }
        match self.score(responses) {
            Some(total) => output.push_str(&format!("Total: {total}\n")),
            None => output.push_str("Total: incomplete\n"),
        }
        output
    }
}

/// Return all registered questionnaires.
pub fn all_questionnaires() -> Vec<Box<dyn Questionnaire>> {
    vec![
        Box::new(instruments::mini_fabq::MiniFabq),
        Box::new(instruments::phq2::Phq2),
    ]
}

/// Look up a questionnaire by ID.
pub fn get_questionnaire(id: &str) -> Result<Box<dyn Questionnaire>, InstrumentError> {
    all_questionnaires()
        .into_iter()
        .find(|q| q.id() == id)
        .ok_or_else(|| InstrumentError::UnknownQuestionnaire(id.to_string()))
}
