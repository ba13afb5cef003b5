//! Progress indicator model for the wizard's modal shell.

use serde::{Deserialize, Serialize};

use super::state_machine::{OnboardingPhase, OnboardingState};
use super::step::{StepId, StepSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Skipped,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepProgress {
    pub id: StepId,
    pub title: String,
    pub required: bool,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    pub current: u8,
    pub total: u8,
    pub percent: u8,
    pub steps: Vec<StepProgress>,
}

impl ProgressView {
    pub fn build(steps: &StepSequence, state: &OnboardingState) -> Self {
        let total = steps.last_id().get();
        let completed = matches!(state.phase, OnboardingPhase::Completed { .. });
        let current = state.current.get().min(total);

        let percent = if completed {
            100
        } else if total <= 1 {
            0
        } else {
            ((u32::from(current) - 1) * 100 / (u32::from(total) - 1)) as u8
        };

        let steps = steps
            .iter()
            .map(|step| {
                let status = if completed {
                    StepStatus::Completed
                } else if step.id == state.current {
                    StepStatus::Current
                } else if step.id > state.current {
                    StepStatus::Upcoming
                } else if state.skipped.contains(&step.id) {
                    StepStatus::Skipped
                } else {
                    StepStatus::Completed
                };
                StepProgress {
                    id: step.id,
                    title: step.title.clone(),
                    required: step.required,
                    status,
                }
            })
            .collect();

        Self {
            current,
            total,
            percent,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::OrganizationId;

    #[test]
    fn first_step_is_zero_percent_last_is_hundred() {
        let steps = StepSequence::studio_default();
        let mut state = OnboardingState::initial();
        assert_eq!(ProgressView::build(&steps, &state).percent, 0);

        state.current = StepId::new(6);
        assert_eq!(ProgressView::build(&steps, &state).percent, 100);

        state.current = StepId::new(3);
        assert_eq!(ProgressView::build(&steps, &state).percent, 40);
    }

    #[test]
    fn statuses_reflect_position_and_skips() {
        let steps = StepSequence::studio_default();
        let state = OnboardingState {
            current: StepId::new(4),
            skipped: vec![StepId::new(3)],
            ..OnboardingState::initial()
        };
        let view = ProgressView::build(&steps, &state);
        let statuses: Vec<StepStatus> = view.steps.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Completed,
                StepStatus::Completed,
                StepStatus::Skipped,
                StepStatus::Current,
                StepStatus::Upcoming,
                StepStatus::Upcoming,
            ]
        );
    }

    #[test]
    fn completed_phase_marks_everything_done() {
        let steps = StepSequence::studio_default();
        let state = OnboardingState {
            current: StepId::new(6),
            phase: OnboardingPhase::Completed {
                organization_id: OrganizationId::new("org-1"),
            },
            ..OnboardingState::initial()
        };
        let view = ProgressView::build(&steps, &state);
        assert_eq!(view.percent, 100);
        assert!(view.steps.iter().all(|s| s.status == StepStatus::Completed));
    }
}
