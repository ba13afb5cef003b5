use std::sync::Arc;

use studio_core::ids::OrganizationId;
use studio_core::onboarding::OnboardingStatus;
use studio_core::ports::{ClockPort, OnboardingStatusPort};

/// Records that onboarding finished, so the wizard is not shown again.
pub struct CompleteOnboarding {
    status: Arc<dyn OnboardingStatusPort>,
    clock: Arc<dyn ClockPort>,
}

impl CompleteOnboarding {
    pub fn new(status: Arc<dyn OnboardingStatusPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { status, clock }
    }

    /// This is a convenience method for the UseCases accessor pattern.
    pub fn from_ports(status: Arc<dyn OnboardingStatusPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self::new(status, clock)
    }

    pub async fn execute(&self, organization_id: OrganizationId) -> anyhow::Result<()> {
        let status = OnboardingStatus::completed(organization_id, self.clock.now());
        self.status.set_status(&status).await
    }
}
