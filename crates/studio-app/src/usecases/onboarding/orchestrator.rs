//! Onboarding orchestrator.
//!
//! Drives the pure wizard state machine and executes its side effects: the
//! single backend submission, status persistence, and toasts.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};

use studio_core::ids::OrganizationId;
use studio_core::onboarding::{
    DraftPatch, OnboardingAction, OnboardingError, OnboardingEvent, OnboardingNotice,
    OnboardingPhase, OnboardingState, OnboardingStateMachine, ProgressView, StepId,
};
use studio_core::ports::{BackendError, NotificationPort, OnboardingSubmissionPort};

use super::context::OnboardingContext;
use super::CompleteOnboarding;

/// Where the UI navigates once the studio has been created.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Successful finish. The redirect target only exists on this path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinishOutcome {
    pub organization_id: OrganizationId,
    pub redirect_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SkipOutcome {
    Skipped { from: StepId, to: StepId },
    /// The current step is required; position and draft are unchanged.
    RefusedRequired { step: StepId },
    /// The wizard is submitting or already completed.
    Ignored,
}

fn event_name(event: &OnboardingEvent) -> &'static str {
    match event {
        OnboardingEvent::Advance => "advance",
        OnboardingEvent::Retreat => "retreat",
        OnboardingEvent::Skip => "skip",
        OnboardingEvent::MergeStepData { .. } => "merge_step_data",
        OnboardingEvent::SubmitStep { .. } => "submit_step",
        OnboardingEvent::Finish => "finish",
        OnboardingEvent::SubmissionSucceeded { .. } => "submission_succeeded",
        OnboardingEvent::SubmissionFailed { .. } => "submission_failed",
        OnboardingEvent::Cancel => "cancel",
    }
}

/// Orchestrator that owns the wizard state and runs its side effects.
pub struct OnboardingOrchestrator {
    machine: OnboardingStateMachine,
    context: Arc<OnboardingContext>,
    submission: Arc<dyn OnboardingSubmissionPort>,
    complete_onboarding: Arc<CompleteOnboarding>,
    notifier: Arc<dyn NotificationPort>,
    last_submission_error: Mutex<Option<BackendError>>,
}

impl OnboardingOrchestrator {
    pub fn new(
        machine: OnboardingStateMachine,
        submission: Arc<dyn OnboardingSubmissionPort>,
        complete_onboarding: Arc<CompleteOnboarding>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            machine,
            context: OnboardingContext::default().arc(),
            submission,
            complete_onboarding,
            notifier,
            last_submission_error: Mutex::new(None),
        }
    }

    pub async fn get_state(&self) -> OnboardingState {
        self.context.get_state().await
    }

    pub async fn progress(&self) -> ProgressView {
        let state = self.context.get_state().await;
        ProgressView::build(self.machine.steps(), &state)
    }

    /// 前进一步（在最后一步时保持不动）。
    pub async fn advance(&self) -> OnboardingState {
        self.dispatch(OnboardingEvent::Advance).await.1
    }

    /// 后退一步（在第一步时保持不动）。
    pub async fn retreat(&self) -> OnboardingState {
        self.dispatch(OnboardingEvent::Retreat).await.1
    }

    pub async fn skip(&self) -> SkipOutcome {
        let (before, after) = self.dispatch(OnboardingEvent::Skip).await;
        if !before.is_editing() {
            return SkipOutcome::Ignored;
        }
        match after.notice {
            Some(OnboardingNotice::RequiredStepNotSkippable { step }) => {
                SkipOutcome::RefusedRequired { step }
            }
            _ => SkipOutcome::Skipped {
                from: before.current,
                to: after.current,
            },
        }
    }

    pub async fn merge_step_data(&self, patch: DraftPatch) -> OnboardingState {
        self.dispatch(OnboardingEvent::MergeStepData { patch }).await.1
    }

    /// The step's "Next" button. Validation problems surface as the state's notice.
    pub async fn submit_step(&self, patch: DraftPatch) -> OnboardingState {
        self.dispatch(OnboardingEvent::SubmitStep { patch }).await.1
    }

    pub async fn cancel(&self) -> OnboardingState {
        self.dispatch(OnboardingEvent::Cancel).await.1
    }

    /// Submit the draft. On failure the draft stays in place for another try.
    pub async fn finish(&self) -> Result<FinishOutcome, OnboardingError> {
        let (before, after) = self.dispatch(OnboardingEvent::Finish).await;
        if !before.is_editing() {
            return Err(OnboardingError::NotEditing);
        }
        if let OnboardingPhase::Completed { organization_id } = after.phase {
            return Ok(FinishOutcome {
                organization_id,
                redirect_to: DASHBOARD_ROUTE.to_string(),
            });
        }
        match after.notice {
            Some(OnboardingNotice::MissingRequiredStep { step }) => {
                Err(OnboardingError::MissingRequiredStep { step })
            }
            Some(OnboardingNotice::FinishBeforeFinalStep) => Err(OnboardingError::NotOnFinalStep),
            Some(OnboardingNotice::SubmissionFailed { message }) => {
                let cause = self
                    .last_submission_error
                    .lock()
                    .await
                    .take()
                    .unwrap_or(BackendError::Network(message));
                Err(OnboardingError::Submission(cause))
            }
            _ => Err(OnboardingError::NotEditing),
        }
    }

    /// Returns the states before and after the event and its follow-ups.
    async fn dispatch(&self, event: OnboardingEvent) -> (OnboardingState, OnboardingState) {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!(
            "usecase.onboarding_orchestrator.dispatch",
            event = event_name(&event)
        );
        async {
            let before = self.context.get_state().await;
            let mut current = before.clone();
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let name = event_name(&event);
                let from = current.current;
                let (next, actions) = self.machine.transition(current, event);
                info!(
                    event = name,
                    from_step = %from,
                    to_step = %next.current,
                    phase = ?next.phase,
                    "onboarding state transition"
                );
                // Published before the actions run so readers see `Submitting`
                // while the backend write is in flight.
                self.context.set_state(next.clone()).await;
                let follow_up_events = self.execute_actions(actions).await;
                current = next;
                pending_events.extend(follow_up_events);
            }

            (before, current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<OnboardingAction>) -> Vec<OnboardingEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            match action {
                OnboardingAction::SubmitDraft { submission } => {
                    debug!(
                        locations = submission.locations.len(),
                        teams = submission.teams.len(),
                        staff = submission.staff.len(),
                        "submitting onboarding draft"
                    );
                    match self.submission.submit(&submission).await {
                        Ok(organization_id) => {
                            *self.last_submission_error.lock().await = None;
                            follow_up_events
                                .push(OnboardingEvent::SubmissionSucceeded { organization_id });
                        }
                        Err(err) => {
                            warn!(error = %err, "onboarding submission failed");
                            let message = err.to_string();
                            *self.last_submission_error.lock().await = Some(err);
                            follow_up_events.push(OnboardingEvent::SubmissionFailed { message });
                        }
                    }
                }
                OnboardingAction::MarkOnboardingComplete { organization_id } => {
                    // Non-fatal: the wizard is offered again on next launch.
                    if let Err(err) = self.complete_onboarding.execute(organization_id).await {
                        error!(error = %err, "failed to persist onboarding status");
                    }
                }
                OnboardingAction::Notify { toast } => self.notifier.notify(toast),
            }
        }
        follow_up_events
    }
}
