//! The deal pipeline board.
//!
//! Dragging a card reassigns its stage in local state only. No backend write is
//! issued: every such change is tracked as an unpersisted move, and
//! [`PipelineBoard::reload`] restores the server view, dropping them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::DealId;
use crate::records::{Deal, DealStage, Record};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("deal {0} is not on the board")]
    UnknownDeal(DealId),
}

/// A local stage change that has not been written to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageMove {
    pub deal_id: DealId,
    pub from: DealStage,
    pub to: DealStage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved(StageMove),
    /// Dropped onto the stage it was already in.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageColumn {
    pub stage: DealStage,
    pub deals: Vec<Deal>,
    pub count: usize,
    /// Sum of deal values in cents.
    pub total_value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineBoard {
    deals: Vec<Deal>,
    server_stages: HashMap<DealId, DealStage>,
}

impl PipelineBoard {
    pub fn new(deals: Vec<Deal>) -> Self {
        let server_stages = deals.iter().map(|d| (d.id.clone(), d.stage)).collect();
        Self {
            deals,
            server_stages,
        }
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn stage_of(&self, deal_id: &DealId) -> Option<DealStage> {
        self.deals.iter().find(|d| d.id() == deal_id).map(|d| d.stage)
    }

    /// Reassign a deal's stage locally. Counts update immediately.
    pub fn move_deal(
        &mut self,
        deal_id: &DealId,
        to: DealStage,
    ) -> Result<MoveOutcome, PipelineError> {
        let deal = self
            .deals
            .iter_mut()
            .find(|d| &d.id == deal_id)
            .ok_or_else(|| PipelineError::UnknownDeal(deal_id.clone()))?;
        if deal.stage == to {
            return Ok(MoveOutcome::Unchanged);
        }
        let from = deal.stage;
        deal.stage = to;
        #[cfg(feature = "tracing")]
        tracing::debug!(deal_id = %deal_id, %from, %to, "deal moved locally");
        Ok(MoveOutcome::Moved(StageMove {
            deal_id: deal_id.clone(),
            from,
            to,
        }))
    }

    pub fn count(&self, stage: DealStage) -> usize {
        self.deals.iter().filter(|d| d.stage == stage).count()
    }

    pub fn stage_value(&self, stage: DealStage) -> i64 {
        self.deals
            .iter()
            .filter(|d| d.stage == stage)
            .map(|d| d.value)
            .fold(0i64, i64::saturating_add)
    }

    /// Value of deals not yet won or lost.
    pub fn open_value(&self) -> i64 {
        self.deals
            .iter()
            .filter(|d| !d.stage.is_closed())
            .map(|d| d.value)
            .fold(0i64, i64::saturating_add)
    }

    /// One column per stage in board order, empty stages included.
    pub fn columns(&self) -> Vec<StageColumn> {
        DealStage::ALL
            .into_iter()
            .map(|stage| {
                let deals: Vec<Deal> = self
                    .deals
                    .iter()
                    .filter(|d| d.stage == stage)
                    .cloned()
                    .collect();
                StageColumn {
                    stage,
                    count: deals.len(),
                    total_value: deals.iter().map(|d| d.value).fold(0i64, i64::saturating_add),
                    deals,
                }
            })
            .collect()
    }

    /// Local stage changes relative to the last server view, in board order.
    pub fn unpersisted_moves(&self) -> Vec<StageMove> {
        self.deals
            .iter()
            .filter_map(|deal| {
                let server = *self.server_stages.get(&deal.id)?;
                (server != deal.stage).then(|| StageMove {
                    deal_id: deal.id.clone(),
                    from: server,
                    to: deal.stage,
                })
            })
            .collect()
    }

    pub fn has_unpersisted_moves(&self) -> bool {
        self.deals
            .iter()
            .any(|d| self.server_stages.get(&d.id).is_some_and(|s| *s != d.stage))
    }

    /// Replace the board with a fresh server view; local moves are discarded.
    pub fn reload(&mut self, deals: Vec<Deal>) -> Vec<StageMove> {
        let discarded = self.unpersisted_moves();
        #[cfg(feature = "tracing")]
        tracing::info!(discarded = discarded.len(), "pipeline board reloaded");
        *self = Self::new(deals);
        discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn deal(id: &str, stage: DealStage, value: i64) -> Deal {
        Deal {
            id: DealId::new(id),
            title: format!("Deal {id}"),
            contact_id: None,
            contact_name: None,
            stage,
            value,
            expected_close: None,
            updated_at: Utc::now(),
        }
    }

    fn server_view() -> Vec<Deal> {
        vec![
            deal("d1", DealStage::New, 500_000),
            deal("d2", DealStage::New, 1_200_000),
            deal("d3", DealStage::Proposal, 3_000_000),
            deal("d4", DealStage::Won, 800_000),
        ]
    }

    #[test]
    fn drag_updates_counts_and_reload_restores_server_view() {
        let mut board = PipelineBoard::new(server_view());
        assert_eq!(board.count(DealStage::New), 2);
        assert_eq!(board.count(DealStage::Won), 1);

        let outcome = board.move_deal(&DealId::new("d1"), DealStage::Won).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved(StageMove {
                deal_id: DealId::new("d1"),
                from: DealStage::New,
                to: DealStage::Won,
            })
        );
        assert_eq!(board.stage_of(&DealId::new("d1")), Some(DealStage::Won));
        assert_eq!(board.count(DealStage::New), 1);
        assert_eq!(board.count(DealStage::Won), 2);
        assert!(board.has_unpersisted_moves());

        let discarded = board.reload(server_view());
        assert_eq!(discarded.len(), 1);
        assert_eq!(board.stage_of(&DealId::new("d1")), Some(DealStage::New));
        assert_eq!(board.count(DealStage::New), 2);
        assert!(!board.has_unpersisted_moves());
    }

    #[test]
    fn same_stage_drop_is_unchanged() {
        let mut board = PipelineBoard::new(server_view());
        let outcome = board.move_deal(&DealId::new("d3"), DealStage::Proposal).unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert!(board.unpersisted_moves().is_empty());
    }

    #[test]
    fn unknown_deal_is_an_error() {
        let mut board = PipelineBoard::new(server_view());
        let err = board.move_deal(&DealId::new("nope"), DealStage::Won).unwrap_err();
        assert_eq!(err, PipelineError::UnknownDeal(DealId::new("nope")));
    }

    #[test]
    fn moving_back_clears_the_pending_move() {
        let mut board = PipelineBoard::new(server_view());
        board.move_deal(&DealId::new("d2"), DealStage::Contacted).unwrap();
        board.move_deal(&DealId::new("d2"), DealStage::Qualified).unwrap();
        assert_eq!(
            board.unpersisted_moves(),
            vec![StageMove {
                deal_id: DealId::new("d2"),
                from: DealStage::New,
                to: DealStage::Qualified,
            }]
        );
        board.move_deal(&DealId::new("d2"), DealStage::New).unwrap();
        assert!(!board.has_unpersisted_moves());
    }

    #[test]
    fn columns_cover_every_stage_with_values() {
        let board = PipelineBoard::new(server_view());
        let columns = board.columns();
        assert_eq!(columns.len(), DealStage::ALL.len());
        let new = &columns[0];
        assert_eq!(new.stage, DealStage::New);
        assert_eq!(new.count, 2);
        assert_eq!(new.total_value, 1_700_000);
        assert_eq!(board.stage_value(DealStage::Lost), 0);
        assert_eq!(board.open_value(), 4_700_000);
    }
}
