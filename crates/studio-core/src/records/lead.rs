use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::ids::LeadId;
use crate::query::{cmp_text, HasStatus, Searchable, Sortable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Unqualified,
    Converted,
}

impl LeadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::Unqualified => "Unqualified",
            Self::Converted => "Converted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    /// Estimated project value in cents.
    #[serde(default)]
    pub estimated_value: i64,
    pub created_at: DateTime<Utc>,
}

impl_record!(Lead, LeadId, "leads");

impl Searchable for Lead {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        if let Some(source) = &self.source {
            fields.push(source);
        }
        fields
    }
}

impl HasStatus for Lead {
    type Status = LeadStatus;

    fn status(&self) -> LeadStatus {
        self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSortKey {
    Name,
    Status,
    EstimatedValue,
    CreatedAt,
}

impl Sortable for Lead {
    type SortKey = LeadSortKey;

    fn compare_by(&self, other: &Self, key: LeadSortKey) -> Ordering {
        match key {
            LeadSortKey::Name => cmp_text(&self.name, &other.name),
            LeadSortKey::Status => (self.status as u8).cmp(&(other.status as u8)),
            LeadSortKey::EstimatedValue => self.estimated_value.cmp(&other.estimated_value),
            LeadSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
