//! Onboarding state machine.
//!
//! Defines a pure state transition function for the onboarding wizard.
//! Side effects (backend submission, status persistence, toasts) are returned
//! as actions and executed by the application-layer orchestrator.

use serde::{Deserialize, Serialize};

use crate::ids::OrganizationId;
use crate::notification::Toast;

use super::draft::{DraftPatch, OnboardingDraft, OnboardingSubmission};
use super::step::{StepId, StepSequence};
use super::validation::FieldError;

/// Wizard lifecycle phase.
///
/// 向导生命周期阶段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum OnboardingPhase {
    /// User is filling in steps.
    Editing,
    /// The aggregate draft has been handed to the backend write.
    Submitting,
    /// The backend accepted the submission and now owns the data.
    Completed { organization_id: OrganizationId },
}

/// Feedback attached to the state after a transition.
///
/// 状态迁移后附带的提示信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnboardingNotice {
    /// `Skip` was pressed on a required step; nothing moved.
    RequiredStepNotSkippable { step: StepId },
    /// Blocking validation failed; the step was not merged or advanced.
    StepInvalid { step: StepId, errors: Vec<FieldError> },
    /// Advisory validation failed; data was merged and the wizard advanced.
    AdvancedWithWarnings { step: StepId, errors: Vec<FieldError> },
    /// `Finish` was pressed without data for a required step.
    MissingRequiredStep { step: StepId },
    /// `Finish` was pressed before reaching the last step.
    FinishBeforeFinalStep,
    /// The backend write failed; the draft is kept for another attempt.
    SubmissionFailed { message: String },
}

/// Wizard state: current step, aggregate draft, and phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingState {
    pub current: StepId,
    pub draft: OnboardingDraft,
    pub phase: OnboardingPhase,
    /// Steps left via `Skip`, in ascending order.
    pub skipped: Vec<StepId>,
    pub notice: Option<OnboardingNotice>,
}

impl OnboardingState {
    /// Fresh wizard: step 1, empty draft.
    pub fn initial() -> Self {
        Self {
            current: StepId::FIRST,
            draft: OnboardingDraft::default(),
            phase: OnboardingPhase::Editing,
            skipped: Vec::new(),
            notice: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.phase == OnboardingPhase::Editing
    }

    fn mark_skipped(&mut self, step: StepId) {
        if let Err(pos) = self.skipped.binary_search(&step) {
            self.skipped.insert(pos, step);
        }
    }

    fn unmark_skipped(&mut self, step: StepId) {
        self.skipped.retain(|s| *s != step);
    }
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Events that drive the wizard.
///
/// 驱动向导的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OnboardingEvent {
    /// Move to `min(current + 1, N)`.
    Advance,
    /// Move to `max(current - 1, 1)`.
    Retreat,
    /// Advance past an optional step.
    Skip,
    /// Shallow-merge a step's partial payload without moving.
    MergeStepData { patch: DraftPatch },
    /// The "Next" button: validate, merge, advance.
    SubmitStep { patch: DraftPatch },
    /// Submit the aggregate draft.
    Finish,
    /// Backend write succeeded (orchestrator feedback).
    SubmissionSucceeded { organization_id: OrganizationId },
    /// Backend write failed (orchestrator feedback).
    SubmissionFailed { message: String },
    /// Discard the draft and start over.
    Cancel,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingAction {
    /// Write the flat submission to the backend (single call).
    SubmitDraft { submission: OnboardingSubmission },
    /// Persist that onboarding is done so the wizard is not shown again.
    MarkOnboardingComplete { organization_id: OrganizationId },
    /// Show a transient toast.
    Notify { toast: Toast },
}

/// Pure onboarding state machine.
///
/// 纯状态机：不包含副作用。
#[derive(Debug, Clone)]
pub struct OnboardingStateMachine {
    steps: StepSequence,
}

impl OnboardingStateMachine {
    pub fn new(steps: StepSequence) -> Self {
        Self { steps }
    }

    pub fn studio_default() -> Self {
        Self::new(StepSequence::studio_default())
    }

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    pub fn transition(
        &self,
        mut state: OnboardingState,
        event: OnboardingEvent,
    ) -> (OnboardingState, Vec<OnboardingAction>) {
        match (state.phase.clone(), event) {
            (OnboardingPhase::Editing, OnboardingEvent::Advance) => {
                state.notice = None;
                state.current = self.steps.next_of(state.current);
                (state, Vec::new())
            }
            (OnboardingPhase::Editing, OnboardingEvent::Retreat) => {
                state.notice = None;
                state.current = self.steps.previous_of(state.current);
                (state, Vec::new())
            }
            (OnboardingPhase::Editing, OnboardingEvent::Skip) => {
                if self.steps.is_required(state.current) {
                    state.notice = Some(OnboardingNotice::RequiredStepNotSkippable {
                        step: state.current,
                    });
                    return (state, Vec::new());
                }
                state.notice = None;
                let from = state.current;
                state.current = self.steps.next_of(from);
                if state.current != from {
                    state.mark_skipped(from);
                }
                (state, Vec::new())
            }
            (OnboardingPhase::Editing, OnboardingEvent::MergeStepData { patch }) => {
                state.draft.merge(patch);
                (state, Vec::new())
            }
            (OnboardingPhase::Editing, OnboardingEvent::SubmitStep { patch }) => {
                let step = state.current;
                if let Some(errors) = self.required_step_errors(step, &patch) {
                    state.notice = Some(OnboardingNotice::StepInvalid { step, errors });
                    return (state, Vec::new());
                }
                let warnings = patch.validate().err();
                state.draft.merge(patch);
                state.unmark_skipped(step);
                state.current = self.steps.next_of(step);
                state.notice =
                    warnings.map(|errors| OnboardingNotice::AdvancedWithWarnings { step, errors });
                (state, Vec::new())
            }
            (OnboardingPhase::Editing, OnboardingEvent::Finish) => {
                if state.current != self.steps.last_id() {
                    state.notice = Some(OnboardingNotice::FinishBeforeFinalStep);
                    return (state, Vec::new());
                }
                let incomplete = self.first_incomplete_required_step(&state.draft);
                match (incomplete, OnboardingSubmission::from_draft(&state.draft)) {
                    (None, Some(submission)) => {
                        state.notice = None;
                        state.phase = OnboardingPhase::Submitting;
                        (state, vec![OnboardingAction::SubmitDraft { submission }])
                    }
                    (incomplete, _) => {
                        state.notice = Some(OnboardingNotice::MissingRequiredStep {
                            step: incomplete.unwrap_or(StepId::FIRST),
                        });
                        (state, Vec::new())
                    }
                }
            }
            (
                OnboardingPhase::Submitting,
                OnboardingEvent::SubmissionSucceeded { organization_id },
            ) => {
                // The backend record is authoritative from here on.
                let next = OnboardingState {
                    current: self.steps.last_id(),
                    draft: OnboardingDraft::default(),
                    phase: OnboardingPhase::Completed {
                        organization_id: organization_id.clone(),
                    },
                    skipped: state.skipped,
                    notice: None,
                };
                (
                    next,
                    vec![
                        OnboardingAction::MarkOnboardingComplete { organization_id },
                        OnboardingAction::Notify {
                            toast: Toast::success("Your studio is ready"),
                        },
                    ],
                )
            }
            (OnboardingPhase::Submitting, OnboardingEvent::SubmissionFailed { message }) => {
                state.phase = OnboardingPhase::Editing;
                state.notice = Some(OnboardingNotice::SubmissionFailed {
                    message: message.clone(),
                });
                (
                    state,
                    vec![OnboardingAction::Notify {
                        toast: Toast::error("Could not finish onboarding", message),
                    }],
                )
            }
            (OnboardingPhase::Editing, OnboardingEvent::Cancel) => {
                (OnboardingState::initial(), Vec::new())
            }
            (_, _event) => (state, Vec::new()),
        }
    }

    /// Errors that keep "Next" on a required step: the step's own slice must be
    /// in the patch and valid. Everything else only warns.
    fn required_step_errors(&self, step: StepId, patch: &DraftPatch) -> Option<Vec<FieldError>> {
        let step = self.steps.get(step).filter(|s| s.required)?;
        match patch.validate_slice(step.kind) {
            Some(outcome) => outcome.err(),
            None => Some(vec![FieldError::new(
                step.kind.slice_name(),
                format!("{} is required", step.title),
            )]),
        }
    }

    fn first_incomplete_required_step(&self, draft: &OnboardingDraft) -> Option<StepId> {
        let slices = DraftPatch::from(draft.clone());
        self.steps
            .iter()
            .filter(|s| s.required)
            .find(|s| !matches!(slices.validate_slice(s.kind), Some(Ok(()))))
            .map(|s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::draft::{AccountDraft, LocationDraft, TeamDraft};

    fn machine() -> OnboardingStateMachine {
        OnboardingStateMachine::studio_default()
    }

    fn at_step(id: u8) -> OnboardingState {
        OnboardingState {
            current: StepId::new(id),
            ..OnboardingState::initial()
        }
    }

    fn valid_account() -> AccountDraft {
        AccountDraft {
            full_name: "Ana Reyes".into(),
            email: "ana@reyes-interiors.com".into(),
            ..Default::default()
        }
    }

    /// Deterministic pseudo-random event stream for sequence checks.
    fn lcg(seed: &mut u64) -> u64 {
        *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        *seed >> 33
    }

    #[test]
    fn any_sequence_of_advance_and_retreat_stays_in_bounds() {
        let m = machine();
        let n = m.steps().last_id();
        for mut seed in 0..64u64 {
            let mut state = OnboardingState::initial();
            for _ in 0..200 {
                let event = match lcg(&mut seed) % 3 {
                    0 => OnboardingEvent::Advance,
                    1 => OnboardingEvent::Retreat,
                    _ => OnboardingEvent::Skip,
                };
                state = m.transition(state, event).0;
                assert!(state.current >= StepId::FIRST && state.current <= n);
            }
        }
    }

    #[test]
    fn advance_clamps_at_last_step() {
        let (next, actions) = machine().transition(at_step(6), OnboardingEvent::Advance);
        assert_eq!(next.current, StepId::new(6));
        assert!(actions.is_empty());
    }

    #[test]
    fn retreat_clamps_at_first_step() {
        let (next, _) = machine().transition(at_step(1), OnboardingEvent::Retreat);
        assert_eq!(next.current, StepId::FIRST);
    }

    #[test]
    fn skip_on_required_step_is_a_no_op_with_notice() {
        let state = at_step(1);
        let (next, actions) = machine().transition(state.clone(), OnboardingEvent::Skip);
        assert_eq!(next.current, state.current);
        assert_eq!(next.draft, state.draft);
        assert_eq!(
            next.notice,
            Some(OnboardingNotice::RequiredStepNotSkippable {
                step: StepId::FIRST
            })
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn skip_on_optional_step_matches_advance() {
        let m = machine();
        for id in 2..=6 {
            let (skipped, _) = m.transition(at_step(id), OnboardingEvent::Skip);
            let (advanced, _) = m.transition(at_step(id), OnboardingEvent::Advance);
            assert_eq!(skipped.current, advanced.current);
            assert_eq!(skipped.draft, advanced.draft);
        }
    }

    #[test]
    fn merge_step_data_does_not_move() {
        let patch = DraftPatch::teams(vec![TeamDraft {
            name: "Hospitality".into(),
            description: None,
        }]);
        let (next, _) = machine().transition(at_step(4), OnboardingEvent::MergeStepData { patch });
        assert_eq!(next.current, StepId::new(4));
        assert_eq!(next.draft.teams.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn invalid_account_blocks_advancement() {
        let patch = DraftPatch::account(AccountDraft {
            full_name: String::new(),
            email: "nope".into(),
            ..Default::default()
        });
        let (next, _) = machine().transition(at_step(1), OnboardingEvent::SubmitStep { patch });
        assert_eq!(next.current, StepId::FIRST);
        assert!(next.draft.account.is_none());
        assert!(matches!(
            next.notice,
            Some(OnboardingNotice::StepInvalid { step, .. }) if step == StepId::FIRST
        ));
    }

    #[test]
    fn next_on_account_step_needs_an_account_slice() {
        let m = machine();
        let patches = [
            DraftPatch::default(),
            DraftPatch::teams(vec![TeamDraft {
                name: "Hospitality".into(),
                description: None,
            }]),
        ];
        for patch in patches {
            let (next, _) = m.transition(at_step(1), OnboardingEvent::SubmitStep { patch });
            assert_eq!(next.current, StepId::FIRST);
            assert!(next.draft.is_empty());
            match next.notice {
                Some(OnboardingNotice::StepInvalid { step, errors }) => {
                    assert_eq!(step, StepId::FIRST);
                    assert_eq!(errors[0].field, "account");
                }
                other => panic!("expected StepInvalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn account_errors_sent_from_an_optional_step_only_warn() {
        let patch = DraftPatch::account(AccountDraft {
            full_name: "A".into(),
            email: "nope".into(),
            ..Default::default()
        });
        let (next, _) = machine().transition(at_step(3), OnboardingEvent::SubmitStep { patch });
        assert_eq!(next.current, StepId::new(4));
        assert!(matches!(
            next.notice,
            Some(OnboardingNotice::AdvancedWithWarnings { step, .. }) if step == StepId::new(3)
        ));
    }

    #[test]
    fn finish_with_an_invalid_account_points_back_to_it() {
        let mut state = at_step(6);
        state.draft.account = Some(AccountDraft {
            full_name: "A".into(),
            email: "nope".into(),
            ..Default::default()
        });
        let (next, actions) = machine().transition(state, OnboardingEvent::Finish);
        assert!(actions.is_empty());
        assert!(next.is_editing());
        assert_eq!(
            next.notice,
            Some(OnboardingNotice::MissingRequiredStep {
                step: StepId::FIRST
            })
        );
    }

    #[test]
    fn valid_account_merges_and_advances() {
        let patch = DraftPatch::account(valid_account());
        let (next, _) = machine().transition(at_step(1), OnboardingEvent::SubmitStep { patch });
        assert_eq!(next.current, StepId::new(2));
        assert_eq!(next.draft.account, Some(valid_account()));
        assert!(next.notice.is_none());
    }

    #[test]
    fn invalid_optional_step_still_advances_with_warnings() {
        let patch = DraftPatch::locations(vec![LocationDraft::default()]);
        let (next, _) = machine().transition(at_step(3), OnboardingEvent::SubmitStep { patch });
        assert_eq!(next.current, StepId::new(4));
        assert_eq!(next.draft.locations.as_ref().map(Vec::len), Some(1));
        assert!(matches!(
            next.notice,
            Some(OnboardingNotice::AdvancedWithWarnings { .. })
        ));
    }

    #[test]
    fn finish_without_account_reports_missing_required_step() {
        let (next, actions) = machine().transition(at_step(6), OnboardingEvent::Finish);
        assert!(actions.is_empty());
        assert!(next.is_editing());
        assert_eq!(
            next.notice,
            Some(OnboardingNotice::MissingRequiredStep {
                step: StepId::FIRST
            })
        );
    }

    #[test]
    fn finish_before_last_step_is_refused() {
        let mut state = at_step(3);
        state.draft.account = Some(valid_account());
        let (next, actions) = machine().transition(state, OnboardingEvent::Finish);
        assert!(actions.is_empty());
        assert_eq!(next.notice, Some(OnboardingNotice::FinishBeforeFinalStep));
    }

    #[test]
    fn finish_submits_then_success_completes_and_clears_draft() {
        let m = machine();
        let mut state = at_step(6);
        state.draft.account = Some(valid_account());

        let (submitting, actions) = m.transition(state, OnboardingEvent::Finish);
        assert_eq!(submitting.phase, OnboardingPhase::Submitting);
        assert!(matches!(actions[0], OnboardingAction::SubmitDraft { .. }));

        let org = OrganizationId::new("org-1");
        let (done, actions) = m.transition(
            submitting,
            OnboardingEvent::SubmissionSucceeded {
                organization_id: org.clone(),
            },
        );
        assert_eq!(
            done.phase,
            OnboardingPhase::Completed {
                organization_id: org.clone()
            }
        );
        assert!(done.draft.is_empty());
        assert_eq!(
            actions[0],
            OnboardingAction::MarkOnboardingComplete {
                organization_id: org
            }
        );
    }

    #[test]
    fn failed_submission_returns_to_editing_and_keeps_draft() {
        let m = machine();
        let mut state = at_step(6);
        state.draft.account = Some(valid_account());
        let (submitting, _) = m.transition(state, OnboardingEvent::Finish);

        let (next, actions) = m.transition(
            submitting,
            OnboardingEvent::SubmissionFailed {
                message: "timeout".into(),
            },
        );
        assert!(next.is_editing());
        assert_eq!(next.draft.account, Some(valid_account()));
        assert!(matches!(actions[0], OnboardingAction::Notify { .. }));
    }

    #[test]
    fn navigation_is_ignored_while_submitting() {
        let state = OnboardingState {
            phase: OnboardingPhase::Submitting,
            ..at_step(6)
        };
        let (next, _) = machine().transition(state.clone(), OnboardingEvent::Retreat);
        assert_eq!(next, state);
        let (next, _) = machine().transition(state.clone(), OnboardingEvent::Cancel);
        assert_eq!(next, state);
    }

    #[test]
    fn cancel_discards_draft() {
        let mut state = at_step(4);
        state.draft.account = Some(valid_account());
        let (next, _) = machine().transition(state, OnboardingEvent::Cancel);
        assert_eq!(next, OnboardingState::initial());
    }

    #[test]
    fn skipped_steps_are_tracked_and_cleared_on_submit() {
        let m = machine();
        let (state, _) = m.transition(at_step(2), OnboardingEvent::Skip);
        assert_eq!(state.skipped, vec![StepId::new(2)]);

        let (state, _) = m.transition(state, OnboardingEvent::Retreat);
        let patch = DraftPatch::organization(crate::onboarding::OrganizationDraft {
            name: "Reyes Interiors".into(),
            ..Default::default()
        });
        let (state, _) = m.transition(state, OnboardingEvent::SubmitStep { patch });
        assert!(state.skipped.is_empty());
    }
}
