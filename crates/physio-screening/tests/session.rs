use std::time::Duration;

use uuid::Uuid;

use physio_core::models::assessment::{NewScreeningAssessment, ScreeningAssessment};
use physio_core::models::body_map::{BodyView, Intensity, MarkedArea, Sensation, SensationType};
use physio_core::models::classification::{CarePathway, RiskLevel};
use physio_core::models::geometry::Point;
use physio_core::models::patient::{Patient, PatientPatch};
use physio_core::models::screening::{
    PainMapping, PersonalInfo, PsfsItem, RedFlags, Scales, StepData, StepKey, Symptoms,
};
use physio_screening::error::{SessionError, SubmitError};
use physio_screening::session::{ScreeningSession, SubmissionState};
use physio_screening::steps::ScreeningStep;
use physio_storage::entities::{BoxFuture, EntityStore};
use physio_storage::error::StorageError;
use physio_storage::memory::{EntityOp, MemoryStore};

fn pain_mapping(worst: u8) -> PainMapping {
    let area = MarkedArea::new(
        vec![
            Point::new(90.0, 120.0),
            Point::new(110.0, 120.0),
            Point::new(110.0, 160.0),
            Point::new(90.0, 160.0),
        ],
        BodyView::Back,
        Sensation {
            sensation_type: SensationType::Pain,
            intensity: Intensity::new(worst).unwrap(),
        },
    )
    .unwrap();
    PainMapping {
        pain_areas: vec![area],
        pain_narrative: "Dull ache after sitting".to_string(),
    }
}

fn at_last_step() -> ScreeningSession {
    let mut session = ScreeningSession::new();
    session
        .update_step_data(StepData::PersonalInfo(PersonalInfo {
            first_name: Some("Grace".to_string()),
            ..Default::default()
        }))
        .unwrap();
    for _ in 0..5 {
        session.next().unwrap();
    }
    session
        .update_step_data(StepData::PainAreas(pain_mapping(6)))
        .unwrap();
    session
}

/// Delays every patient creation, to exercise the submission timeout.
struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl EntityStore for SlowStore {
    fn create_patient(&self, info: PersonalInfo) -> BoxFuture<'_, Result<Patient, StorageError>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.inner.create_patient(info).await
        })
    }

    fn update_patient(
        &self,
        id: Uuid,
        patch: PatientPatch,
    ) -> BoxFuture<'_, Result<Patient, StorageError>> {
        self.inner.update_patient(id, patch)
    }

    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<Patient>, StorageError>> {
        self.inner.list_patients()
    }

    fn create_assessment(
        &self,
        draft: NewScreeningAssessment,
    ) -> BoxFuture<'_, Result<ScreeningAssessment, StorageError>> {
        self.inner.create_assessment(draft)
    }

    fn list_assessments(&self) -> BoxFuture<'_, Result<Vec<ScreeningAssessment>, StorageError>> {
        self.inner.list_assessments()
    }
}

#[test]
fn starts_at_step_one() {
    let session = ScreeningSession::new();
    assert_eq!(session.current_step(), ScreeningStep::Step(StepKey::PersonalInfo));
    assert_eq!(session.step_number(), 1);
    assert_eq!(session.total_steps(), 6);
    assert_eq!(session.current_title(), "Personal Information");
    assert_eq!(session.submission_state(), SubmissionState::Idle);
    assert!(session.result().is_none());
}

#[test]
fn next_and_previous_move_one_step() {
    let mut session = ScreeningSession::new();
    assert_eq!(session.previous().unwrap(), StepKey::PersonalInfo);

    assert_eq!(session.next().unwrap(), StepKey::Symptoms);
    assert_eq!(session.next().unwrap(), StepKey::PainAreas);
    assert_eq!(session.previous().unwrap(), StepKey::Symptoms);
    assert_eq!(session.step_number(), 2);
    assert!((session.progress_percent() - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn next_from_the_last_step_requires_submit() {
    let mut session = at_last_step();
    assert!(matches!(session.next(), Err(SessionError::SubmitRequired)));
    assert_eq!(session.step_number(), 6);
    assert_eq!(session.progress_percent(), 100.0);
}

#[test]
fn steps_ahead_cannot_be_edited() {
    let mut session = ScreeningSession::new();
    session.next().unwrap();

    let err = session
        .update_step_data(StepData::Scales(Scales::default()))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::StepNotReached {
            step: StepKey::Scales,
            current: 2
        }
    ));

    session
        .update_step_data(StepData::Symptoms(Symptoms {
            primary_complaint: Some("Knee pain".to_string()),
            ..Default::default()
        }))
        .unwrap();
    session
        .update_step_data(StepData::PersonalInfo(PersonalInfo::default()))
        .unwrap();
    assert_eq!(
        session.data().symptoms.primary_complaint.as_deref(),
        Some("Knee pain")
    );
}

#[test]
fn invalid_slices_are_rejected() {
    let mut session = at_last_step();

    let mut flags = RedFlags::default();
    flags.set("unheard_of", true);
    assert!(matches!(
        session.update_step_data(StepData::RedFlags(flags)),
        Err(SessionError::InvalidStepData {
            step: StepKey::RedFlags,
            ..
        })
    ));

    let item = PsfsItem {
        activity: "Walking".to_string(),
        rating: 5,
    };
    let scales = Scales {
        psfs_items: vec![item; 4],
        ..Default::default()
    };
    assert!(session.update_step_data(StepData::Scales(scales)).is_err());
    assert!(session.data().red_flags.0.is_empty());
}

#[test]
fn submit_only_from_the_last_step() {
    let mut session = ScreeningSession::new();
    assert!(matches!(
        session.begin_submission(),
        Err(SessionError::NotAtFinalStep)
    ));
    assert_eq!(session.submission_state(), SubmissionState::Idle);
}

#[tokio::test]
async fn successful_submission_reaches_results() {
    let store = MemoryStore::new();
    let mut session = at_last_step();

    let receipt = session.submit(&store).await.unwrap();
    assert_eq!(session.current_step(), ScreeningStep::Results);
    assert_eq!(session.submission_state(), SubmissionState::Submitted);
    assert_eq!(session.result(), Some(&receipt.result));
    assert_eq!(receipt.result.risk_level, RiskLevel::Medium);

    assert!(receipt.patient.screening_completed);
    assert_eq!(
        receipt.patient.care_pathway,
        Some(CarePathway::StandardizedProgram)
    );
    assert_eq!(receipt.assessment.fields.patient_id, receipt.patient.id);
    assert_eq!(
        receipt.assessment.fields.assessment_notes,
        "Screening completed. Pathway: standardized_program. Risk: medium."
    );

    assert!(matches!(session.next(), Err(SessionError::AlreadySubmitted)));
    assert!(matches!(
        session.submit(&store).await,
        Err(SubmitError::Session(SessionError::AlreadySubmitted))
    ));
    assert_eq!(store.list_patients().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rejected_submission_can_be_retried() {
    let store = MemoryStore::new();
    store.fail_next(EntityOp::CreatePatient, 1).await;

    let mut session = at_last_step();
    let before = session.data().clone();

    let err = session.submit(&store).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(session.submission_state(), SubmissionState::Failed);
    assert_eq!(session.current_step(), ScreeningStep::Step(StepKey::RedFlags));
    assert_eq!(session.data(), &before);
    assert!(session.last_error().is_some());
    assert!(session.result().is_none());

    session.submit(&store).await.unwrap();
    assert_eq!(session.current_step(), ScreeningStep::Results);
    assert!(session.last_error().is_none());
    assert_eq!(store.call_count(EntityOp::CreatePatient).await, 2);
    assert_eq!(store.list_patients().await.unwrap().len(), 1);
}

#[tokio::test]
async fn retry_after_partial_failure_reuses_records() {
    let store = MemoryStore::new();
    store.fail_next(EntityOp::UpdatePatient, 1).await;

    let mut session = at_last_step();
    assert!(session.submit(&store).await.is_err());
    assert_eq!(store.list_patients().await.unwrap().len(), 1);
    assert_eq!(store.list_assessments().await.unwrap().len(), 1);

    let receipt = session.submit(&store).await.unwrap();
    assert_eq!(store.call_count(EntityOp::CreatePatient).await, 1);
    assert_eq!(store.call_count(EntityOp::CreateAssessment).await, 1);

    let patients = store.list_patients().await.unwrap();
    assert_eq!(patients.len(), 1);
    assert!(patients[0].screening_completed);
    assert_eq!(store.list_assessments().await.unwrap()[0].id, receipt.assessment.id);
}

#[tokio::test]
async fn editing_after_failure_writes_a_fresh_assessment() {
    let store = MemoryStore::new();
    store.fail_next(EntityOp::UpdatePatient, 1).await;

    let mut session = at_last_step();
    assert!(session.submit(&store).await.is_err());

    session
        .update_step_data(StepData::PainAreas(pain_mapping(9)))
        .unwrap();
    let receipt = session.submit(&store).await.unwrap();

    assert_eq!(receipt.result.risk_level, RiskLevel::High);
    assert_eq!(receipt.assessment.fields.risk_level, RiskLevel::High);
    assert_eq!(store.call_count(EntityOp::CreatePatient).await, 1);
    assert_eq!(store.list_assessments().await.unwrap().len(), 2);
}

#[tokio::test]
async fn only_one_submission_at_a_time() {
    let store = MemoryStore::new();
    let mut session = at_last_step();

    let submission = session.begin_submission().unwrap();
    assert_eq!(session.submission_state(), SubmissionState::Submitting);
    assert!(matches!(
        session.begin_submission(),
        Err(SessionError::SubmissionInProgress)
    ));
    assert!(matches!(
        session.update_step_data(StepData::RedFlags(RedFlags::default())),
        Err(SessionError::SubmissionInProgress)
    ));
    assert!(matches!(
        session.previous(),
        Err(SessionError::SubmissionInProgress)
    ));

    let outcome = submission.run(&store).await;
    session.complete_submission(outcome).unwrap();
    assert_eq!(session.submission_state(), SubmissionState::Submitted);
}

#[tokio::test]
async fn slow_store_times_out_and_retry_succeeds() {
    let store = SlowStore {
        inner: MemoryStore::new(),
        delay: Duration::from_millis(300),
    };
    let mut session = at_last_step().with_timeout(Duration::from_millis(20));

    let err = session.submit(&store).await.unwrap_err();
    assert!(matches!(err, SubmitError::TimedOut(_)));
    assert!(err.is_retryable());
    assert_eq!(session.submission_state(), SubmissionState::Failed);

    let mut session = at_last_step().with_timeout(Duration::from_secs(5));
    session.submit(&store).await.unwrap();
    assert_eq!(session.submission_state(), SubmissionState::Submitted);
}

/// Never answers patient creation.
struct StalledStore(MemoryStore);

impl EntityStore for StalledStore {
    fn create_patient(&self, _info: PersonalInfo) -> BoxFuture<'_, Result<Patient, StorageError>> {
        Box::pin(std::future::pending::<Result<Patient, StorageError>>())
    }

    fn update_patient(
        &self,
        id: Uuid,
        patch: PatientPatch,
    ) -> BoxFuture<'_, Result<Patient, StorageError>> {
        self.0.update_patient(id, patch)
    }

    fn list_patients(&self) -> BoxFuture<'_, Result<Vec<Patient>, StorageError>> {
        self.0.list_patients()
    }

    fn create_assessment(
        &self,
        draft: NewScreeningAssessment,
    ) -> BoxFuture<'_, Result<ScreeningAssessment, StorageError>> {
        self.0.create_assessment(draft)
    }

    fn list_assessments(&self) -> BoxFuture<'_, Result<Vec<ScreeningAssessment>, StorageError>> {
        self.0.list_assessments()
    }
}

#[tokio::test]
async fn cancelled_submit_leaves_the_session_retryable() {
    let stalled = StalledStore(MemoryStore::new());
    let mut session = at_last_step();

    let cancelled =
        tokio::time::timeout(Duration::from_millis(20), session.submit(&stalled)).await;
    assert!(cancelled.is_err());

    assert_eq!(session.submission_state(), SubmissionState::Failed);
    assert!(session.last_error().is_some());
    assert_eq!(session.current_step(), ScreeningStep::Step(StepKey::RedFlags));
    session
        .update_step_data(StepData::RedFlags(RedFlags::default()))
        .unwrap();

    let store = MemoryStore::new();
    session.submit(&store).await.unwrap();
    assert_eq!(session.current_step(), ScreeningStep::Results);
    assert!(session.last_error().is_none());
}

#[test]
fn dropped_submission_can_be_abandoned_once() {
    let mut session = at_last_step();
    assert!(!session.abandon_submission());

    let submission = session.begin_submission().unwrap();
    drop(submission);
    assert_eq!(session.submission_state(), SubmissionState::Submitting);

    assert!(session.abandon_submission());
    assert_eq!(session.submission_state(), SubmissionState::Failed);
    assert!(!session.abandon_submission());
    assert!(session.begin_submission().is_ok());
}

#[test]
fn step_and_state_serialize_for_the_frontend() {
    assert_eq!(
        serde_json::to_value(ScreeningStep::Step(StepKey::Scales)).unwrap(),
        serde_json::json!({ "step": "scales" })
    );
    assert_eq!(
        serde_json::to_value(ScreeningStep::Results).unwrap(),
        serde_json::json!("results")
    );
    assert_eq!(
        serde_json::to_value(SubmissionState::Submitting).unwrap(),
        serde_json::json!("submitting")
    );
}
