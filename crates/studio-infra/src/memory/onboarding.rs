use async_trait::async_trait;
use studio_core::onboarding::OnboardingSubmission;
use studio_core::ports::OnboardingSubmissionPort;
use studio_core::{BackendError, OrganizationId};
use tokio::sync::Mutex;

/// Accepts every submission and mints a local organization id.
#[derive(Default)]
pub struct LocalOnboardingSubmitter {
    submissions: Mutex<Vec<OnboardingSubmission>>,
}

impl LocalOnboardingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submissions(&self) -> Vec<OnboardingSubmission> {
        self.submissions.lock().await.clone()
    }
}

#[async_trait]
impl OnboardingSubmissionPort for LocalOnboardingSubmitter {
    async fn submit(
        &self,
        submission: &OnboardingSubmission,
    ) -> Result<OrganizationId, BackendError> {
        self.submissions.lock().await.push(submission.clone());
        Ok(OrganizationId::generate())
    }
}
