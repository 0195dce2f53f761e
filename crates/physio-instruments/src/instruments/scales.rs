use serde::{Deserialize, Serialize};
use ts_rs::TS;

use physio_core::models::screening::Scales;

use super::mini_fabq::MiniFabq;
use super::phq2::Phq2;
use super::psfs::Psfs;
use crate::Questionnaire;
use crate::scoring::ValidationError;

/// Totals for the clinical-questionnaires step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleScores {
    pub psfs_mean: Option<f64>,
    pub mini_fabq: Option<u8>,
    pub phq2: Option<u8>,
    pub phq2_positive: bool,
}

/// Scores plus every validation problem found while computing them.
#[derive(Debug, Clone, Default)]
pub struct ScaleReport {
    pub scores: ScaleScores,
    pub errors: Vec<ValidationError>,
}

/// Score every questionnaire in the step. Invalid or incomplete
/// questionnaires score `None`; their problems are listed in `errors`.
pub fn score_scales(scales: &Scales) -> ScaleReport {
    let mut errors = Psfs.validate(&scales.psfs_items);
    errors.extend(MiniFabq.validate(&scales.fabq_responses));
    errors.extend(Phq2.validate(&scales.phq_responses));

    ScaleReport {
        scores: ScaleScores {
            psfs_mean: Psfs.score(&scales.psfs_items),
            mini_fabq: MiniFabq.score(&scales.fabq_responses),
            phq2: Phq2.score(&scales.phq_responses),
            phq2_positive: Phq2.is_positive(&scales.phq_responses),
        },
        errors,
    }
}
