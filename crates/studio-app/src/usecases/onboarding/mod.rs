//! Onboarding use cases
//!
//! The wizard itself is driven by [`OnboardingOrchestrator`]; the smaller use
//! cases read and write the persisted completion status.

pub mod complete;
pub mod context;
pub mod get_status;
pub mod orchestrator;

pub use complete::CompleteOnboarding;
pub use context::OnboardingContext;
pub use get_status::GetOnboardingStatus;
pub use orchestrator::{FinishOutcome, OnboardingOrchestrator, SkipOutcome, DASHBOARD_ROUTE};
