//! Sales opportunities shown on the pipeline board.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::ids::{ContactId, DealId};
use crate::query::{cmp_option, cmp_text, HasStatus, Searchable, Sortable};

/// Pipeline stages, in board column order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    #[default]
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl DealStage {
    pub const ALL: [DealStage; 7] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::Proposal,
        Self::Negotiation,
        Self::Won,
        Self::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub title: String,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub stage: DealStage,
    /// Deal value in cents.
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub expected_close: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(Deal, DealId, "deals");

impl Searchable for Deal {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(name) = &self.contact_name {
            fields.push(name);
        }
        fields
    }
}

impl HasStatus for Deal {
    type Status = DealStage;

    fn status(&self) -> DealStage {
        self.stage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealSortKey {
    Title,
    Value,
    ExpectedClose,
    UpdatedAt,
}

impl Sortable for Deal {
    type SortKey = DealSortKey;

    fn compare_by(&self, other: &Self, key: DealSortKey) -> Ordering {
        match key {
            DealSortKey::Title => cmp_text(&self.title, &other.title),
            DealSortKey::Value => self.value.cmp(&other.value),
            DealSortKey::ExpectedClose => cmp_option(&self.expected_close, &other.expected_close),
            DealSortKey::UpdatedAt => self.updated_at.cmp(&other.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_in_board_order() {
        let mut sorted = DealStage::ALL;
        sorted.sort();
        assert_eq!(sorted, DealStage::ALL);
        assert_eq!(DealStage::ALL.first(), Some(&DealStage::New));
        assert!(DealStage::Lost.is_closed());
        assert!(!DealStage::Proposal.is_closed());
    }

    #[test]
    fn parses_and_serializes_lowercase_names() {
        assert_eq!(DealStage::parse(" Won "), Some(DealStage::Won));
        assert_eq!(DealStage::parse("closed"), None);
        assert_eq!(
            serde_json::to_value(DealStage::Negotiation).unwrap(),
            serde_json::json!("negotiation")
        );
    }
}
