use std::time::Duration;

use uuid::Uuid;

use physio_core::models::assessment::{
    NewScreeningAssessment, ScreeningAssessment, assessment_notes,
};
use physio_core::models::classification::ClassificationResult;
use physio_core::models::patient::{Patient, PatientPatch};
use physio_core::models::screening::ScreeningData;
use physio_instruments::instruments::scales::{ScaleScores, score_scales};
use physio_storage::entities::EntityStore;

use crate::classifier;
use crate::error::SubmitError;
use crate::events::ScreeningEvent;

/// Records written by earlier attempts, reused so a retry does not
/// create them twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionProgress {
    pub patient_id: Option<Uuid>,
    pub assessment: Option<ScreeningAssessment>,
}

/// Everything a successful submission produced.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub patient: Patient,
    pub assessment: ScreeningAssessment,
    pub result: ClassificationResult,
}

#[derive(Debug)]
pub struct SubmissionFailure {
    pub error: SubmitError,
    pub progress: SubmissionProgress,
}

pub type SubmissionOutcome = Result<SubmissionReceipt, SubmissionFailure>;

/// A pending submission. Owns a snapshot of the screening data, so the
/// session it came from is not borrowed while the store is awaited.
#[derive(Debug)]
pub struct Submission {
    data: ScreeningData,
    progress: SubmissionProgress,
    timeout: Option<Duration>,
}

impl Submission {
    pub(crate) fn new(
        data: ScreeningData,
        progress: SubmissionProgress,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            data,
            progress,
            timeout,
        }
    }

    pub fn data(&self) -> &ScreeningData {
        &self.data
    }

    /// Write the patient, the assessment, and the patient's final pathway.
    pub async fn run(self, store: &dyn EntityStore) -> SubmissionOutcome {
        let Self {
            data,
            mut progress,
            timeout,
        } = self;

        let outcome = match timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, persist(&data, &mut progress, store)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SubmitError::TimedOut(limit)),
                }
            }
            None => persist(&data, &mut progress, store).await,
        };

        outcome.map_err(|error| {
            tracing::warn!(
                error = %error,
                patient_created = progress.patient_id.is_some(),
                assessment_created = progress.assessment.is_some(),
                "screening submission failed"
            );
            SubmissionFailure { error, progress }
        })
    }
}

async fn persist(
    data: &ScreeningData,
    progress: &mut SubmissionProgress,
    store: &dyn EntityStore,
) -> Result<SubmissionReceipt, SubmitError> {
    let result = classifier::classify(data);

    let report = score_scales(&data.scales);
    for error in &report.errors {
        tracing::warn!(item = %error.item_id, "{error}");
    }

    let patient_id = match progress.patient_id {
        Some(id) => id,
        None => {
            let patient = store.create_patient(data.personal_info.clone()).await?;
            progress.patient_id = Some(patient.id);
            patient.id
        }
    };

    let assessment = match &progress.assessment {
        Some(existing) => existing.clone(),
        None => {
            let draft = build_assessment(patient_id, data, &result, &report.scores);
            let created = store.create_assessment(draft).await?;
            progress.assessment = Some(created.clone());
            created
        }
    };

    let patient = store
        .update_patient(
            patient_id,
            PatientPatch {
                care_pathway: Some(result.pathway),
                screening_completed: Some(true),
            },
        )
        .await?;

    ScreeningEvent::completed(patient.id, assessment.id, result.pathway, result.risk_level).emit();

    Ok(SubmissionReceipt {
        patient,
        assessment,
        result,
    })
}

/// The assessment record for a screening, before the store assigns its id.
pub fn build_assessment(
    patient_id: Uuid,
    data: &ScreeningData,
    result: &ClassificationResult,
    scores: &ScaleScores,
) -> NewScreeningAssessment {
    let symptoms = &data.symptoms;
    let functional = &data.functional;
    NewScreeningAssessment {
        patient_id,
        problem_type: symptoms.problem_type,
        primary_complaint: symptoms.primary_complaint.clone(),
        symptom_onset: symptoms.symptom_onset,
        symptom_duration: symptoms.duration,
        aggravating_factors: symptoms.aggravating_factors.clone(),
        relieving_factors: symptoms.relieving_factors.clone(),
        pain_areas: data.pain_areas.pain_areas.clone(),
        pain_narrative: data.pain_areas.pain_narrative.clone(),
        patient_narrative: functional.patient_narrative.clone(),
        functional_goals: functional.goals.clone(),
        impact_on_life: functional.impact_on_life.clone(),
        support_system: functional.support_system.clone(),
        red_flags: data.red_flags.clone(),
        psfs_items: data.scales.psfs_items.clone(),
        mini_fabq_score: scores.mini_fabq,
        mood_phq_score: scores.phq2,
        recommended_pathway: result.pathway,
        risk_level: result.risk_level,
        assessment_notes: assessment_notes(result.pathway, result.risk_level),
    }
}
