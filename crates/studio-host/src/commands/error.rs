//! Centralized error mapping for commands.
//!
//! Every command returns `Result<_, CommandError>`; the UI switches on `code`
//! and shows `message`.

use serde::Serialize;
use studio_app::usecases::{AttachmentError, ProjectScheduleError};
use studio_core::onboarding::OnboardingError;
use studio_core::pipeline::PipelineError;
use studio_core::query::QueryError;
use studio_core::schedule::ScheduleError;
use studio_core::storage::StorageUrlError;
use studio_core::BackendError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct CommandError {
    pub code: &'static str,
    pub message: String,
}

impl CommandError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("invalid_request", message)
    }
}

impl From<BackendError> for CommandError {
    fn from(err: BackendError) -> Self {
        let code = match &err {
            BackendError::NotFound => "not_found",
            BackendError::Unauthorized => "unauthorized",
            BackendError::Conflict => "conflict",
            BackendError::Rejected { .. } => "rejected",
            BackendError::Network(_) => "network",
            BackendError::Decode(_) => "decode",
        };
        Self::new(code, err.to_string())
    }
}

impl From<OnboardingError> for CommandError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::Submission(backend) => backend.into(),
            OnboardingError::MissingRequiredStep { .. } => {
                Self::new("missing_required_step", err.to_string())
            }
            OnboardingError::NotOnFinalStep | OnboardingError::NotEditing => {
                Self::new("invalid_state", err.to_string())
            }
        }
    }
}

impl From<PipelineError> for CommandError {
    fn from(err: PipelineError) -> Self {
        Self::new("not_found", err.to_string())
    }
}

impl From<QueryError> for CommandError {
    fn from(err: QueryError) -> Self {
        Self::invalid_request(err.to_string())
    }
}

impl From<StorageUrlError> for CommandError {
    fn from(err: StorageUrlError) -> Self {
        match err {
            StorageUrlError::MissingBackendUrl | StorageUrlError::MissingBucket => {
                Self::new("not_configured", err.to_string())
            }
            _ => Self::invalid_request(err.to_string()),
        }
    }
}

impl From<AttachmentError> for CommandError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::Url(url) => url.into(),
            AttachmentError::Backend(backend) => backend.into(),
        }
    }
}

impl From<ScheduleError> for CommandError {
    fn from(err: ScheduleError) -> Self {
        Self::invalid_request(err.to_string())
    }
}

impl From<ProjectScheduleError> for CommandError {
    fn from(err: ProjectScheduleError) -> Self {
        match err {
            ProjectScheduleError::Backend(backend) => backend.into(),
            ProjectScheduleError::Schedule(schedule) => schedule.into(),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self::new("internal", format!("{err:#}"))
    }
}
