use std::collections::HashMap;

use tokio::sync::Mutex;
use uuid::Uuid;

use physio_core::models::assessment::{NewScreeningAssessment, ScreeningAssessment};
use physio_core::models::patient::{Patient, PatientPatch};
use physio_core::models::screening::PersonalInfo;
use physio_core::record_keys;

use crate::entities::{self, BoxFuture, EntityStore};
use crate::error::StorageError;

/// The store operations, for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityOp {
    CreatePatient,
    UpdatePatient,
    ListPatients,
    CreateAssessment,
    ListAssessments,
}

#[derive(Debug, Default)]
struct MemoryState {
    patients: Vec<Patient>,
    assessments: Vec<ScreeningAssessment>,
    /// Remaining forced failures per operation.
    failures: HashMap<EntityOp, usize>,
    calls: HashMap<EntityOp, usize>,
}

impl MemoryState {
    /// Count the call and consume one forced failure if any are pending.
    fn enter(&mut self, op: EntityOp) -> Result<(), StorageError> {
        *self.calls.entry(op).or_default() += 1;
        match self.failures.get_mut(&op) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(StorageError::Unavailable(format!("{op:?} rejected")))
            }
            _ => Ok(()),
        }
    }
}

/// In-process record store. Records live as long as the store does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `times` calls of `op` fail with
    /// [`StorageError::Unavailable`].
    pub async fn fail_next(&self, op: EntityOp, times: usize) {
        self.state.lock().await.failures.insert(op, times);
    }

    pub async fn call_count(&self, op: EntityOp) -> usize {
        self.state.lock().await.calls.get(&op).copied().unwrap_or(0)
    }
}

impl EntityStore for MemoryStore {
    fn create_patient(&self, info: PersonalInfo) -> BoxFuture<'_, Result<Patient, StorageError>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.enter(EntityOp::CreatePatient)?;
            let patient = entities::new_patient(info);
            state.patients.push(patient.clone());
            tracing::debug!(patient_id = %patient.id, "patient record created");
            Ok(patient)
        })
    }

    fn update_patient(
        &self,
        id: Uuid,
        patch: PatientPatch,
    ) -> BoxFuture<'_, Result<Patient, StorageError>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.enter(EntityOp::UpdatePatient)?;
            let patient = state
                .patients
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StorageError::NotFound {
                    key: record_keys::patient(id),
                })?;
            patient.apply(&patch, jiff::Timestamp::now());
            Ok(patient.clone())
        })
    }

    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<Patient>, StorageError>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.enter(EntityOp::ListPatients)?;
            Ok(state.patients.clone())
        })
    }

    fn create_assessment(
        &self,
        draft: NewScreeningAssessment,
    ) -> BoxFuture<'_, Result<ScreeningAssessment, StorageError>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.enter(EntityOp::CreateAssessment)?;
            let assessment = entities::new_assessment(draft);
            state.assessments.push(assessment.clone());
            tracing::debug!(assessment_id = %assessment.id, "screening assessment created");
            Ok(assessment)
        })
    }

    fn list_assessments(&self) -> BoxFuture<'_, Result<Vec<ScreeningAssessment>, StorageError>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            state.enter(EntityOp::ListAssessments)?;
            Ok(state.assessments.clone())
        })
    }
}
