use chrono::{DateTime, Utc};

use crate::ids::OrganizationId;

/// Onboarding status persisted across app restarts.
///
/// 入门引导持久化状态。
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OnboardingStatus {
    /// Whether the wizard has been finished successfully
    pub has_completed: bool,
    /// When the backend accepted the submission
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Organization created by the submission
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
}

impl OnboardingStatus {
    pub fn completed(organization_id: OrganizationId, at: DateTime<Utc>) -> Self {
        Self {
            has_completed: true,
            completed_at: Some(at),
            organization_id: Some(organization_id),
        }
    }
}
