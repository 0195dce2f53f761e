use std::path::{Path, PathBuf};

use uuid::Uuid;

use physio_core::models::assessment::{NewScreeningAssessment, ScreeningAssessment};
use physio_core::models::patient::{Patient, PatientPatch};
use physio_core::models::screening::PersonalInfo;
use physio_core::record_keys;

use crate::entities::{self, BoxFuture, EntityStore};
use crate::error::StorageError;
use crate::state;

/// One pretty-printed JSON file per record under a root directory:
/// `patients/<id>.json` and `assessments/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl EntityStore for JsonDirStore {
    fn create_patient(&self, info: PersonalInfo) -> BoxFuture<'_, Result<Patient, StorageError>> {
        Box::pin(async move {
            let patient = entities::new_patient(info);
            state::save_record(&self.root, &record_keys::patient(patient.id), &patient).await?;
            tracing::info!(patient_id = %patient.id, "patient record created");
            Ok(patient)
        })
    }

    fn update_patient(
        &self,
        id: Uuid,
        patch: PatientPatch,
    ) -> BoxFuture<'_, Result<Patient, StorageError>> {
        Box::pin(async move {
            let key = record_keys::patient(id);
            let mut patient: Patient = state::load_record(&self.root, &key).await?;
            patient.apply(&patch, jiff::Timestamp::now());
            state::save_record(&self.root, &key, &patient).await?;
            tracing::info!(patient_id = %id, "patient record updated");
            Ok(patient)
        })
    }

    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<Patient>, StorageError>> {
        Box::pin(async move {
            let mut patients: Vec<Patient> =
                state::load_all(&self.root, record_keys::PATIENTS_PREFIX).await?;
            patients.sort_by_key(|p| p.created_at);
            Ok(patients)
        })
    }

    fn create_assessment(
        &self,
        draft: NewScreeningAssessment,
    ) -> BoxFuture<'_, Result<ScreeningAssessment, StorageError>> {
        Box::pin(async move {
            let assessment = entities::new_assessment(draft);
            state::save_record(
                &self.root,
                &record_keys::assessment(assessment.id),
                &assessment,
            )
            .await?;
            tracing::info!(
                assessment_id = %assessment.id,
                patient_id = %assessment.fields.patient_id,
                "screening assessment created"
            );
            Ok(assessment)
        })
    }

    fn list_assessments(&self) -> BoxFuture<'_, Result<Vec<ScreeningAssessment>, StorageError>> {
        Box::pin(async move {
            let mut assessments: Vec<ScreeningAssessment> =
                state::load_all(&self.root, record_keys::ASSESSMENTS_PREFIX).await?;
            assessments.sort_by_key(|a| a.created_at);
            Ok(assessments)
        })
    }
}
