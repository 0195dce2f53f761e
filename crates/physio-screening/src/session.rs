use std::time::Duration;

use serde::Serialize;
use ts_rs::TS;

use physio_core::models::classification::ClassificationResult;
use physio_core::models::screening::{ScreeningData, StepData, StepKey};
use physio_storage::entities::EntityStore;

use crate::error::{SessionError, SubmitError};
use crate::steps::{self, ScreeningStep};
use crate::submission::{Submission, SubmissionOutcome, SubmissionProgress, SubmissionReceipt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed,
}

/// One patient's pass through the screening steps.
///
/// Steps advance one at a time. The last step is left by submitting, which
/// writes the records and moves to the results page; until then every step
/// at or before the current one may be edited.
#[derive(Debug, Clone)]
pub struct ScreeningSession {
    current: ScreeningStep,
    data: ScreeningData,
    submission_state: SubmissionState,
    result: Option<ClassificationResult>,
    last_error: Option<String>,
    progress: SubmissionProgress,
    timeout: Option<Duration>,
}

impl ScreeningSession {
    pub fn new() -> Self {
        Self::with_data(ScreeningData::default())
    }

    /// Start at the first step with previously collected data.
    pub fn with_data(data: ScreeningData) -> Self {
        Self {
            current: ScreeningStep::Step(StepKey::first()),
            data,
            submission_state: SubmissionState::Idle,
            result: None,
            last_error: None,
            progress: SubmissionProgress::default(),
            timeout: None,
        }
    }

    /// Give up on a submission attempt after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn current_step(&self) -> ScreeningStep {
        self.current
    }

    /// 1-based; the results page reports one past the last step.
    pub fn step_number(&self) -> usize {
        self.current.number()
    }

    pub fn total_steps(&self) -> usize {
        StepKey::ALL.len()
    }

    /// Progress through the data steps, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        let done = self.current.number().min(self.total_steps());
        done as f64 / self.total_steps() as f64 * 100.0
    }

    pub fn current_title(&self) -> &'static str {
        self.current.title()
    }

    pub fn data(&self) -> &ScreeningData {
        &self.data
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission_state
    }

    /// The classification, once submission has succeeded.
    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    /// Message of the most recent failed attempt, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn next(&mut self) -> Result<StepKey, SessionError> {
        let key = self.editable_step()?;
        let next = key.next().ok_or(SessionError::SubmitRequired)?;
        self.current = ScreeningStep::Step(next);
        tracing::debug!(step = %next, "advanced screening step");
        Ok(next)
    }

    /// Go back one step. Stays put on the first step.
    pub fn previous(&mut self) -> Result<StepKey, SessionError> {
        let key = self.editable_step()?;
        let previous = key.previous().unwrap_or(key);
        self.current = ScreeningStep::Step(previous);
        Ok(previous)
    }

    /// Replace one step's slice. Only steps already reached may be edited.
    pub fn update_step_data(&mut self, data: StepData) -> Result<(), SessionError> {
        let current = self.editable_step()?;
        let step = data.key();
        if step > current {
            return Err(SessionError::StepNotReached {
                step,
                current: current.number(),
            });
        }
        steps::validate(&data)?;

        // Records from a failed attempt no longer match the data.
        if step == StepKey::PersonalInfo {
            self.progress = SubmissionProgress::default();
        } else {
            self.progress.assessment = None;
        }

        self.data.apply(data);
        Ok(())
    }

    /// Guard and snapshot for a submission. On success the session is
    /// `Submitting` until [`ScreeningSession::complete_submission`].
    pub fn begin_submission(&mut self) -> Result<Submission, SessionError> {
        let current = self.editable_step()?;
        if current != StepKey::last() {
            return Err(SessionError::NotAtFinalStep);
        }
        self.submission_state = SubmissionState::Submitting;
        tracing::info!("screening submission started");
        Ok(Submission::new(
            self.data.clone(),
            self.progress.clone(),
            self.timeout,
        ))
    }

    /// Apply the outcome of [`Submission::run`].
    pub fn complete_submission(
        &mut self,
        outcome: SubmissionOutcome,
    ) -> Result<SubmissionReceipt, SubmitError> {
        match outcome {
            Ok(receipt) => {
                self.submission_state = SubmissionState::Submitted;
                self.result = Some(receipt.result.clone());
                self.progress = SubmissionProgress::default();
                self.last_error = None;
                self.current = ScreeningStep::Results;
                tracing::info!(
                    pathway = %receipt.result.pathway,
                    risk_level = %receipt.result.risk_level,
                    "screening submitted"
                );
                Ok(receipt)
            }
            Err(failure) => {
                self.submission_state = SubmissionState::Failed;
                self.progress = failure.progress;
                self.last_error = Some(failure.error.to_string());
                Err(failure.error)
            }
        }
    }

    /// Give up on a submission whose outcome will never arrive, such as one
    /// whose [`Submission`] was dropped. The session becomes `Failed` and may
    /// be edited or resubmitted. Returns `false` when nothing was in flight.
    ///
    /// Records written by the abandoned attempt are not known to the session,
    /// so the next attempt starts from the progress held before it began.
    pub fn abandon_submission(&mut self) -> bool {
        if self.submission_state != SubmissionState::Submitting {
            return false;
        }
        self.submission_state = SubmissionState::Failed;
        self.last_error = Some(ABANDONED.to_string());
        tracing::warn!("screening submission abandoned before it finished");
        true
    }

    /// Submit from the last step and wait for the store.
    ///
    /// Dropping the returned future mid-flight leaves the session `Failed`.
    pub async fn submit(
        &mut self,
        store: &dyn EntityStore,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let submission = self.begin_submission()?;
        let guard = AbandonOnDrop(self);
        let outcome = submission.run(store).await;
        guard.0.complete_submission(outcome)
    }

    /// The current data step, or why the session cannot be changed now.
    fn editable_step(&self) -> Result<StepKey, SessionError> {
        match (self.submission_state, self.current) {
            (SubmissionState::Submitting, _) => Err(SessionError::SubmissionInProgress),
            (SubmissionState::Submitted, _) | (_, ScreeningStep::Results) => {
                Err(SessionError::AlreadySubmitted)
            }
            (_, ScreeningStep::Step(key)) => Ok(key),
        }
    }
}

const ABANDONED: &str = "submission was cancelled before it finished";

/// Held across the store await in [`ScreeningSession::submit`].
struct AbandonOnDrop<'a>(&'a mut ScreeningSession);

impl Drop for AbandonOnDrop<'_> {
    fn drop(&mut self) {
        self.0.abandon_submission();
    }
}

impl Default for ScreeningSession {
    fn default() -> Self {
        Self::new()
    }
}
