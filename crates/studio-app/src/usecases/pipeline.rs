//! Pipeline board session.
//!
//! Holds one [`PipelineBoard`] for the open screen. Drag-and-drop reassigns
//! stages locally; there is no write path for stage changes, so
//! [`PipelineSession::reload`] always brings back the server view.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, info_span, Instrument};

use studio_core::ids::DealId;
use studio_core::pipeline::{MoveOutcome, PipelineBoard, PipelineError, StageColumn, StageMove};
use studio_core::ports::{BackendError, RecordRepositoryPort};
use studio_core::records::{Deal, DealStage};

pub struct PipelineSession {
    deals: Arc<dyn RecordRepositoryPort<Deal>>,
    board: RwLock<PipelineBoard>,
}

impl PipelineSession {
    pub fn from_ports(deals: Arc<dyn RecordRepositoryPort<Deal>>) -> Self {
        Self {
            deals,
            board: RwLock::new(PipelineBoard::default()),
        }
    }

    /// Fetch deals and rebuild the board. Local moves are discarded.
    pub async fn reload(&self) -> Result<Vec<StageColumn>, BackendError> {
        let span = info_span!("usecase.pipeline.reload");
        async {
            let page = self.deals.list(None).await?;
            let mut board = self.board.write().await;
            let discarded = board.reload(page.items);
            if !discarded.is_empty() {
                info!(count = discarded.len(), "unpersisted stage moves discarded by reload");
            }
            Ok(board.columns())
        }
        .instrument(span)
        .await
    }

    pub async fn columns(&self) -> Vec<StageColumn> {
        self.board.read().await.columns()
    }

    /// Drop a card on a stage column.
    pub async fn move_deal(
        &self,
        deal_id: &DealId,
        to: DealStage,
    ) -> Result<MoveOutcome, PipelineError> {
        let span = info_span!("usecase.pipeline.move_deal", deal_id = %deal_id, to = %to);
        async { self.board.write().await.move_deal(deal_id, to) }
            .instrument(span)
            .await
    }

    pub async fn unpersisted_moves(&self) -> Vec<StageMove> {
        self.board.read().await.unpersisted_moves()
    }
}
