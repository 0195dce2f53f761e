use serde::Serialize;
use ts_rs::TS;

use physio_core::models::screening::{StepData, StepKey};
use physio_instruments::instruments::psfs::Psfs;
use physio_instruments::red_flags;

use crate::error::SessionError;

/// Where the flow is: one of the data steps, or the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScreeningStep {
    Step(StepKey),
    Results,
}

impl ScreeningStep {
    /// 1-based step number; results count as one past the last step.
    pub fn number(&self) -> usize {
        match self {
            Self::Step(key) => key.number(),
            Self::Results => StepKey::last().number() + 1,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Step(key) => key.title(),
            Self::Results => "Results",
        }
    }
}

/// Check a slice before it replaces the stored one.
pub fn validate(data: &StepData) -> Result<(), SessionError> {
    match data {
        StepData::RedFlags(flags) => {
            if let Some(unknown) = flags.0.keys().find(|id| red_flags::question(id).is_none()) {
                return Err(SessionError::InvalidStepData {
                    step: data.key(),
                    message: format!("unknown safety-check question '{unknown}'"),
                });
            }
        }
        StepData::Scales(scales) if scales.psfs_items.len() > Psfs::MAX_ITEMS => {
            return Err(SessionError::InvalidStepData {
                step: data.key(),
                message: format!("at most {} PSFS activities may be listed", Psfs::MAX_ITEMS),
            });
        }
        _ => {}
    }
    Ok(())
}
