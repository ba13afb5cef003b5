//! Command DTOs for the frontend API.
//!
//! These shapes separate what the screens receive from the domain models, so
//! the domain can change without breaking the UI.

use serde::Serialize;
use studio_core::format::{format_minutes, format_money};
use studio_core::onboarding::{
    OnboardingDraft, OnboardingNotice, OnboardingPhase, OnboardingState, ProgressView,
};
use studio_core::pipeline::{StageColumn, StageMove};
use studio_core::records::{Deal, DealStage, TimeEntry, User};
use studio_core::session::SessionSnapshot;

/// Wizard state plus the modal shell's progress indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingStateDto {
    pub current_step: u8,
    pub phase: OnboardingPhase,
    pub notice: Option<OnboardingNotice>,
    pub draft: OnboardingDraft,
    pub progress: ProgressView,
}

impl OnboardingStateDto {
    pub fn new(state: OnboardingState, progress: ProgressView) -> Self {
        Self {
            current_step: state.current.get(),
            phase: state.phase,
            notice: state.notice,
            draft: state.draft,
            progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageColumnDto {
    pub stage: DealStage,
    pub label: &'static str,
    pub count: usize,
    pub total_value: i64,
    pub total_label: String,
    pub deals: Vec<Deal>,
}

impl From<StageColumn> for StageColumnDto {
    fn from(column: StageColumn) -> Self {
        Self {
            stage: column.stage,
            label: column.stage.label(),
            count: column.count,
            total_value: column.total_value,
            total_label: format_money(column.total_value, None),
            deals: column.deals,
        }
    }
}

/// The pipeline board with its local-only moves flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineBoardDto {
    pub columns: Vec<StageColumnDto>,
    /// Stage changes made on this board that a reload will discard.
    pub unpersisted_moves: Vec<StageMove>,
}

impl PipelineBoardDto {
    pub fn new(columns: Vec<StageColumn>, unpersisted_moves: Vec<StageMove>) -> Self {
        Self {
            columns: columns.into_iter().map(StageColumnDto::from).collect(),
            unpersisted_moves,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDto {
    pub current_user: User,
    pub team: Vec<User>,
    pub can_manage: bool,
}

impl From<&SessionSnapshot> for SessionDto {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            current_user: snapshot.current_user.clone(),
            team: snapshot.team.clone(),
            can_manage: snapshot.can_manage(),
        }
    }
}

/// A time-tracking row as the timesheet table shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntryDto {
    #[serde(flatten)]
    pub entry: TimeEntry,
    pub duration: String,
}

impl From<TimeEntry> for TimeEntryDto {
    fn from(entry: TimeEntry) -> Self {
        Self {
            duration: format_minutes(entry.minutes),
            entry,
        }
    }
}
