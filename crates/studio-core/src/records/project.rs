use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::ids::{ProjectId, TaskId, UserId};
use crate::query::{cmp_option, cmp_text, HasStatus, Searchable, Sortable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    OnHold,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Budget in cents.
    #[serde(default)]
    pub budget: i64,
}

impl_record!(Project, ProjectId, "projects");

impl Searchable for Project {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(client) = &self.client_name {
            fields.push(client);
        }
        fields
    }
}

impl HasStatus for Project {
    type Status = ProjectStatus;

    fn status(&self) -> ProjectStatus {
        self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSortKey {
    Name,
    StartDate,
    DueDate,
    Budget,
}

impl Sortable for Project {
    type SortKey = ProjectSortKey;

    fn compare_by(&self, other: &Self, key: ProjectSortKey) -> Ordering {
        match key {
            ProjectSortKey::Name => cmp_text(&self.name, &other.name),
            ProjectSortKey::StartDate => cmp_option(&self.start_date, &other.start_date),
            ProjectSortKey::DueDate => cmp_option(&self.due_date, &other.due_date),
            ProjectSortKey::Budget => self.budget.cmp(&other.budget),
        }
    }
}

/// A scheduled unit of project work; the rows of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee_id: Option<UserId>,
    #[serde(default)]
    pub done: bool,
}

impl_record!(Task, TaskId, "tasks");

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}
