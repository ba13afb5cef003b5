//! Project Gantt schedule.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info_span, Instrument};

use studio_core::ids::ProjectId;
use studio_core::ports::{BackendError, RecordRepositoryPort};
use studio_core::records::Task;
use studio_core::schedule::{GanttChart, ScheduleError, Zoom};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectScheduleError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub struct BuildProjectSchedule {
    tasks: Arc<dyn RecordRepositoryPort<Task>>,
}

impl BuildProjectSchedule {
    pub fn from_ports(tasks: Arc<dyn RecordRepositoryPort<Task>>) -> Self {
        Self { tasks }
    }

    /// Lay out a project's tasks. Without `range` the view spans the tasks' own dates.
    pub async fn execute(
        &self,
        project_id: &ProjectId,
        zoom: Zoom,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<GanttChart, ProjectScheduleError> {
        let span = info_span!("usecase.schedule.build", project_id = %project_id, ?zoom);
        async {
            let tasks: Vec<Task> = self
                .tasks
                .list(None)
                .await?
                .items
                .into_iter()
                .filter(|task| &task.project_id == project_id)
                .collect();
            Ok(GanttChart::build(&tasks, zoom, range)?)
        }
        .instrument(span)
        .await
    }
}
