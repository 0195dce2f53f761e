//! Safety-check questions. A "yes" to any of them routes the patient to an
//! urgent medical assessment.

use serde::Serialize;

use physio_core::models::screening::RedFlags;

use crate::error::InstrumentError;
use crate::scoring::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RedFlagQuestion {
    pub id: &'static str,
    pub label: &'static str,
}

pub static QUESTIONS: [RedFlagQuestion; 8] = [
    RedFlagQuestion {
        id: "trauma",
        label: "Have you had any recent significant trauma (e.g., a fall, car accident)?",
    },
    RedFlagQuestion {
        id: "weight_loss",
        label: "Have you experienced unexplained weight loss of more than 5kg (10 lbs) in the last 3 months?",
    },
    RedFlagQuestion {
        id: "fever_sweats",
        label: "Have you had a fever, chills, or night sweats recently?",
    },
    RedFlagQuestion {
        id: "night_pain",
        label: "Do you have constant pain at night that does not change or get better with any position?",
    },
    RedFlagQuestion {
        id: "bladder_bowel",
        label: "Have you experienced any new or worsening problems with your bladder or bowel control (e.g., incontinence)?",
    },
    RedFlagQuestion {
        id: "neuro_symptoms",
        label: "Have you noticed numbness or tingling in the groin or buttock area (saddle area)?",
    },
    RedFlagQuestion {
        id: "systemic_disease",
        label: "Do you have a personal history of cancer?",
    },
    RedFlagQuestion {
        id: "severe_pain",
        label: "Is your pain severe, unrelenting, and getting progressively worse?",
    },
];

pub fn question(id: &str) -> Option<&'static RedFlagQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Record an answer, rejecting ids that are not in the catalogue.
pub fn answer(flags: &mut RedFlags, id: &str, yes: bool) -> Result<(), InstrumentError> {
    if question(id).is_none() {
        return Err(ValidationError {
            item_id: id.to_string(),
            value: u8::from(yes),
            expected_range: None,
            message: format!("unknown safety-check question '{id}'"),
        }
        .into());
    }
    flags.set(id, yes);
    Ok(())
}

/// Labels of every question answered "yes", in catalogue order.
pub fn raised_labels(flags: &RedFlags) -> Vec<&'static str> {
    QUESTIONS
        .iter()
        .filter(|q| flags.0.get(q.id).copied().unwrap_or(false))
        .map(|q| q.label)
        .collect()
}
