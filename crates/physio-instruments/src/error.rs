use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
