use std::sync::Arc;

use studio_core::onboarding::OnboardingStatus;
use studio_core::ports::OnboardingStatusPort;

/// Reads whether the wizard still needs to be shown.
pub struct GetOnboardingStatus {
    status: Arc<dyn OnboardingStatusPort>,
}

impl GetOnboardingStatus {
    pub fn from_ports(status: Arc<dyn OnboardingStatusPort>) -> Self {
        Self { status }
    }

    pub async fn execute(&self) -> anyhow::Result<OnboardingStatus> {
        self.status.get_status().await
    }
}
