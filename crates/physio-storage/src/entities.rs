use std::future::Future;
use std::pin::Pin;

use uuid::Uuid;

use physio_core::models::assessment::{NewScreeningAssessment, ScreeningAssessment};
use physio_core::models::patient::{Patient, PatientPatch};
use physio_core::models::screening::PersonalInfo;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// CRUD access to the records a screening produces.
///
/// `create_*` assigns the id and timestamps and returns the stored record.
pub trait EntityStore: Send + Sync {
    fn create_patient(&self, info: PersonalInfo) -> BoxFuture<'_, Result<Patient, StorageError>>;

    fn update_patient(
        &self,
        id: Uuid,
        patch: PatientPatch,
    ) -> BoxFuture<'_, Result<Patient, StorageError>>;

    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<Patient>, StorageError>>;

    fn create_assessment(
        &self,
        draft: NewScreeningAssessment,
    ) -> BoxFuture<'_, Result<ScreeningAssessment, StorageError>>;

    fn list_assessments(&self) -> BoxFuture<'_, Result<Vec<ScreeningAssessment>, StorageError>>;
}

/// Build a new patient record stamped with the current time.
pub fn new_patient(info: PersonalInfo) -> Patient {
    let now = jiff::Timestamp::now();
    Patient {
        id: Uuid::new_v4(),
        info,
        care_pathway: None,
        screening_completed: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_assessment(fields: NewScreeningAssessment) -> ScreeningAssessment {
    ScreeningAssessment {
        id: Uuid::new_v4(),
        fields,
        created_at: jiff::Timestamp::now(),
    }
}
