//! Onboarding ports
//!
//! The submission port performs the single backend write on finish. The status
//! port persists whether the wizard has been completed on this machine.

use async_trait::async_trait;

use super::BackendError;
use crate::ids::OrganizationId;
use crate::onboarding::{OnboardingStatus, OnboardingSubmission};

#[async_trait]
pub trait OnboardingSubmissionPort: Send + Sync {
    /// Submit the flattened draft; returns the created organization.
    async fn submit(
        &self,
        submission: &OnboardingSubmission,
    ) -> Result<OrganizationId, BackendError>;
}

#[async_trait]
pub trait OnboardingStatusPort: Send + Sync {
    async fn get_status(&self) -> anyhow::Result<OnboardingStatus>;

    async fn set_status(&self, status: &OnboardingStatus) -> anyhow::Result<()>;

    /// Reset (for re-onboarding)
    async fn reset(&self) -> anyhow::Result<()>;

    async fn is_completed(&self) -> anyhow::Result<bool> {
        Ok(self.get_status().await?.has_completed)
    }
}
