use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// How a questionnaire's total is derived from its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreType {
    /// Sum of item responses.
    Sum,
    /// Mean of item responses.
    Mean,
}

/// Inclusive range of valid integer responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: u8,
    pub max: u8,
}

impl ScoreRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A labelled answer choice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseOption {
    pub value: u8,
    pub label: String,
}

/// One question of a questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub range: ScoreRange,
    pub options: Vec<ResponseOption>,
}

impl Item {
    /// An item whose options are just the numbers in `range`.
    pub fn numeric(id: &str, text: &str, range: ScoreRange) -> Self {
        let options = (range.min..=range.max)
            .map(|value| ResponseOption {
                value,
                label: value.to_string(),
            })
            .collect();
        Self {
            id: id.to_string(),
            text: text.to_string(),
            range,
            options,
        }
    }

    pub fn labelled(id: &str, text: &str, labels: &[&str]) -> Self {
        let options: Vec<_> = labels
            .iter()
            .enumerate()
            .map(|(value, label)| ResponseOption {
                value: value as u8,
                label: label.to_string(),
            })
            .collect();
        Self {
            id: id.to_string(),
            text: text.to_string(),
            range: ScoreRange::new(0, options.len().saturating_sub(1) as u8),
            options,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub item_id: String,
    pub value: u8,
    /// `None` when the item does not exist.
    pub expected_range: Option<ScoreRange>,
    pub message: String,
}
