use physio_core::models::assessment::{assessment_notes, NewScreeningAssessment};
use physio_core::models::classification::{CarePathway, RiskLevel};
use physio_core::models::patient::PatientPatch;
use physio_core::models::screening::{PersonalInfo, RedFlags};
use physio_storage::entities::EntityStore;
use physio_storage::error::StorageError;
use physio_storage::json_dir::JsonDirStore;
use physio_storage::memory::{EntityOp, MemoryStore};
use uuid::Uuid;

fn info(first: &str) -> PersonalInfo {
    PersonalInfo {
        first_name: Some(first.to_string()),
        ..Default::default()
    }
}

fn draft(patient_id: Uuid) -> NewScreeningAssessment {
    NewScreeningAssessment {
        patient_id,
        problem_type: None,
        primary_complaint: Some("Lower back pain".to_string()),
        symptom_onset: None,
        symptom_duration: None,
        aggravating_factors: None,
        relieving_factors: None,
        pain_areas: vec![],
        pain_narrative: String::new(),
        patient_narrative: None,
        functional_goals: None,
        impact_on_life: None,
        support_system: None,
        red_flags: RedFlags::default(),
        psfs_items: vec![],
        mini_fabq_score: None,
        mood_phq_score: None,
        recommended_pathway: CarePathway::SelfManagement,
        risk_level: RiskLevel::Low,
        assessment_notes: assessment_notes(CarePathway::SelfManagement, RiskLevel::Low),
    }
}

#[tokio::test]
async fn memory_store_assigns_ids_and_applies_patches() {
    let store = MemoryStore::new();
    let patient = store.create_patient(info("Ada")).await.unwrap();
    assert!(!patient.screening_completed);

    let updated = store
        .update_patient(
            patient.id,
            PatientPatch {
                care_pathway: Some(CarePathway::PersonalizedCare),
                screening_completed: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, patient.id);
    assert_eq!(updated.care_pathway, Some(CarePathway::PersonalizedCare));
    assert!(updated.screening_completed);

    let listed = store.list_patients().await.unwrap();
    assert_eq!(listed, vec![updated]);
}

#[tokio::test]
async fn memory_store_updating_unknown_patient_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .update_patient(Uuid::new_v4(), PatientPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn injected_failures_are_consumed_in_order() {
    let store = MemoryStore::new();
    store.fail_next(EntityOp::CreatePatient, 1).await;

    let err = store.create_patient(info("Ada")).await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(store.list_patients().await.unwrap().is_empty());

    store.create_patient(info("Ada")).await.unwrap();
    assert_eq!(store.call_count(EntityOp::CreatePatient).await, 2);
}

#[tokio::test]
async fn json_dir_store_persists_records_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());

    let patient = store.create_patient(info("Grace")).await.unwrap();
    let assessment = store.create_assessment(draft(patient.id)).await.unwrap();
    store
        .update_patient(
            patient.id,
            PatientPatch {
                care_pathway: Some(CarePathway::SelfManagement),
                screening_completed: Some(true),
            },
        )
        .await
        .unwrap();

    assert!(dir.path().join(format!("patients/{}.json", patient.id)).exists());
    assert!(!dir.path().join(format!("patients/{}.json.tmp", patient.id)).exists());

    // A fresh handle on the same directory sees the same records.
    let reopened = JsonDirStore::new(dir.path());
    let patients = reopened.list_patients().await.unwrap();
    assert_eq!(patients.len(), 1);
    assert!(patients[0].screening_completed);
    assert_eq!(patients[0].info.first_name.as_deref(), Some("Grace"));

    let assessments = reopened.list_assessments().await.unwrap();
    assert_eq!(assessments, vec![assessment]);
    assert_eq!(
        assessments[0].fields.assessment_notes,
        "Screening completed. Pathway: self_management. Risk: low."
    );
}

#[tokio::test]
async fn json_dir_store_lists_nothing_in_an_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path().join("not-created-yet"));
    assert!(store.list_patients().await.unwrap().is_empty());
    assert!(store.list_assessments().await.unwrap().is_empty());
}

#[tokio::test]
async fn json_dir_store_update_of_missing_patient_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    let err = store
        .update_patient(Uuid::new_v4(), PatientPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}
