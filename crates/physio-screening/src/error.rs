use std::time::Duration;

use thiserror::Error;

use physio_core::models::screening::StepKey;
use physio_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the last step is submitted, not advanced")]
    SubmitRequired,

    #[error("submission is only possible from the {} step", StepKey::last().title())]
    NotAtFinalStep,

    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("screening has already been submitted")]
    AlreadySubmitted,

    #[error("step '{step}' has not been reached yet (current step: {current})")]
    StepNotReached { step: StepKey, current: usize },

    #[error("invalid data for step '{step}': {message}")]
    InvalidStepData { step: StepKey, message: String },
}

/// Why a submission attempt failed. Every variant leaves the session
/// ready for another attempt.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("record store error: {0}")]
    Storage(#[from] StorageError),

    #[error("record store did not respond within {0:?}")]
    TimedOut(Duration),
}

impl SubmitError {
    /// Whether calling `submit` again may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::Session(SessionError::AlreadySubmitted | SessionError::NotAtFinalStep)
        )
    }
}
