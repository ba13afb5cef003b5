use thiserror::Error;

use super::step::StepId;
use crate::ports::BackendError;

/// Why `finish` did not complete onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnboardingError {
    #[error("step {step} must be completed before finishing")]
    MissingRequiredStep { step: StepId },
    #[error("finish is only available on the last step")]
    NotOnFinalStep,
    #[error("onboarding is not being edited")]
    NotEditing,
    #[error("submission failed: {0}")]
    Submission(#[from] BackendError),
}
