//! Onboarding wizard commands
//! 入门引导向导命令

use serde::Serialize;
use tracing::{info_span, Instrument};

use studio_app::usecases::{FinishOutcome, SkipOutcome};
use studio_core::onboarding::{DraftPatch, OnboardingState, OnboardingStatus};

use super::dto::OnboardingStateDto;
use super::CommandError;
use crate::bootstrap::AppRuntime;

async fn state_dto(runtime: &AppRuntime, state: OnboardingState) -> OnboardingStateDto {
    let progress = runtime.usecases().onboarding_orchestrator().progress().await;
    OnboardingStateDto::new(state, progress)
}

/// Get current wizard state
/// 获取当前向导状态
pub async fn get_onboarding_state(
    runtime: &AppRuntime,
) -> Result<OnboardingStateDto, CommandError> {
    let span = info_span!("command.onboarding.get_state");
    async {
        let state = runtime.usecases().onboarding_orchestrator().get_state().await;
        Ok(state_dto(runtime, state).await)
    }
    .instrument(span)
    .await
}

/// Persisted completion status, read on startup to decide whether to show the wizard.
/// 读取持久化的完成状态
pub async fn get_onboarding_status(runtime: &AppRuntime) -> Result<OnboardingStatus, CommandError> {
    let span = info_span!("command.onboarding.get_status");
    async { Ok(runtime.usecases().get_onboarding_status().execute().await?) }
        .instrument(span)
        .await
}

pub async fn advance(runtime: &AppRuntime) -> Result<OnboardingStateDto, CommandError> {
    let span = info_span!("command.onboarding.advance");
    async {
        let state = runtime.usecases().onboarding_orchestrator().advance().await;
        Ok(state_dto(runtime, state).await)
    }
    .instrument(span)
    .await
}

pub async fn retreat(runtime: &AppRuntime) -> Result<OnboardingStateDto, CommandError> {
    let span = info_span!("command.onboarding.retreat");
    async {
        let state = runtime.usecases().onboarding_orchestrator().retreat().await;
        Ok(state_dto(runtime, state).await)
    }
    .instrument(span)
    .await
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipResponse {
    pub outcome: SkipOutcome,
    pub state: OnboardingStateDto,
}

/// Skip the current step. Refused on required steps.
/// 跳过当前步骤（必填步骤会被拒绝）
pub async fn skip(runtime: &AppRuntime) -> Result<SkipResponse, CommandError> {
    let span = info_span!("command.onboarding.skip");
    async {
        let orchestrator = runtime.usecases().onboarding_orchestrator();
        let outcome = orchestrator.skip().await;
        let state = orchestrator.get_state().await;
        Ok(SkipResponse {
            outcome,
            state: state_dto(runtime, state).await,
        })
    }
    .instrument(span)
    .await
}

/// Merge a form's fields into the draft without moving.
pub async fn merge_step_data(
    runtime: &AppRuntime,
    patch: DraftPatch,
) -> Result<OnboardingStateDto, CommandError> {
    let span = info_span!("command.onboarding.merge_step_data");
    async {
        let orchestrator = runtime.usecases().onboarding_orchestrator();
        let state = orchestrator.merge_step_data(patch).await;
        Ok(state_dto(runtime, state).await)
    }
    .instrument(span)
    .await
}

/// Merge a form's fields and advance.
pub async fn submit_step(
    runtime: &AppRuntime,
    patch: DraftPatch,
) -> Result<OnboardingStateDto, CommandError> {
    let span = info_span!("command.onboarding.submit_step");
    async {
        let orchestrator = runtime.usecases().onboarding_orchestrator();
        let state = orchestrator.submit_step(patch).await;
        Ok(state_dto(runtime, state).await)
    }
    .instrument(span)
    .await
}

/// Submit the whole draft and create the studio.
/// 提交草稿并创建工作室
pub async fn finish(runtime: &AppRuntime) -> Result<FinishOutcome, CommandError> {
    let span = info_span!("command.onboarding.finish");
    async { Ok(runtime.usecases().onboarding_orchestrator().finish().await?) }
        .instrument(span)
        .await
}

pub async fn cancel(runtime: &AppRuntime) -> Result<OnboardingStateDto, CommandError> {
    let span = info_span!("command.onboarding.cancel");
    async {
        let state = runtime.usecases().onboarding_orchestrator().cancel().await;
        Ok(state_dto(runtime, state).await)
    }
    .instrument(span)
    .await
}
