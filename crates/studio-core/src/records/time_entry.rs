use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::ids::{ProjectId, TaskId, TimeEntryId, UserId};
use crate::query::{cmp_text, Searchable, Sortable};

/// Time logged by a team member against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub description: String,
    pub started_at: DateTime<Utc>,
    pub minutes: u32,
    #[serde(default = "default_billable")]
    pub billable: bool,
}

fn default_billable() -> bool {
    true
}

impl_record!(TimeEntry, TimeEntryId, "time_entries");

impl Searchable for TimeEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEntrySortKey {
    StartedAt,
    Minutes,
    Description,
}

impl Sortable for TimeEntry {
    type SortKey = TimeEntrySortKey;

    fn compare_by(&self, other: &Self, key: TimeEntrySortKey) -> Ordering {
        match key {
            TimeEntrySortKey::StartedAt => self.started_at.cmp(&other.started_at),
            TimeEntrySortKey::Minutes => self.minutes.cmp(&other.minutes),
            TimeEntrySortKey::Description => cmp_text(&self.description, &other.description),
        }
    }
}
