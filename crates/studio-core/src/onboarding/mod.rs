//! Onboarding domain module.
//!
//! This module defines the wizard step sequence, the aggregate draft, field
//! validation, and the pure state machine that sequences the wizard.

pub mod draft;
mod error;
pub mod progress;
pub mod state_machine;
pub mod status;
pub mod step;
pub mod validation;

pub use draft::{
    AccountDraft, DraftPatch, LocationDraft, OnboardingDraft, OnboardingSubmission,
    OrganizationDraft, StaffInvite, StaffRole, TeamDraft,
};
pub use error::OnboardingError;
pub use progress::{ProgressView, StepProgress, StepStatus};
pub use state_machine::{
    OnboardingAction, OnboardingEvent, OnboardingNotice, OnboardingPhase, OnboardingState,
    OnboardingStateMachine,
};
pub use status::OnboardingStatus;
pub use step::{Step, StepId, StepKind, StepSequence};
pub use validation::{FieldError, FieldValidator};
