//! Pipeline board commands
//! 销售管道看板命令

use tracing::{info_span, Instrument};

use studio_core::ids::DealId;
use studio_core::pipeline::MoveOutcome;
use studio_core::records::DealStage;

use super::dto::PipelineBoardDto;
use super::CommandError;
use crate::bootstrap::AppRuntime;

async fn board(runtime: &AppRuntime) -> PipelineBoardDto {
    let pipeline = runtime.usecases().pipeline_session();
    PipelineBoardDto::new(pipeline.columns().await, pipeline.unpersisted_moves().await)
}

/// Fetch deals and rebuild the board, discarding local moves.
/// 重新加载看板（丢弃本地拖拽结果）
pub async fn load_board(runtime: &AppRuntime) -> Result<PipelineBoardDto, CommandError> {
    let span = info_span!("command.pipeline.load_board");
    async {
        runtime.usecases().pipeline_session().reload().await?;
        Ok(board(runtime).await)
    }
    .instrument(span)
    .await
}

/// Drop a card on a column. The change stays on this board only.
pub async fn move_deal(
    runtime: &AppRuntime,
    deal_id: DealId,
    stage: DealStage,
) -> Result<PipelineBoardDto, CommandError> {
    let span = info_span!("command.pipeline.move_deal", deal_id = %deal_id, stage = %stage);
    async {
        let outcome = runtime
            .usecases()
            .pipeline_session()
            .move_deal(&deal_id, stage)
            .await?;
        if outcome == MoveOutcome::Unchanged {
            tracing::debug!("deal dropped on its own column");
        }
        Ok(board(runtime).await)
    }
    .instrument(span)
    .await
}
