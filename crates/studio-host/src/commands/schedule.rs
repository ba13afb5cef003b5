//! Project Gantt command

use chrono::NaiveDate;
use tracing::{info_span, Instrument};

use studio_core::ids::ProjectId;
use studio_core::schedule::{GanttChart, Zoom};

use super::CommandError;
use crate::bootstrap::AppRuntime;

pub async fn get_project_schedule(
    runtime: &AppRuntime,
    project_id: ProjectId,
    zoom: Zoom,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<GanttChart, CommandError> {
    let span = info_span!("command.schedule.get", project_id = %project_id, ?zoom);
    async {
        let uc = runtime.usecases().build_project_schedule();
        Ok(uc.execute(&project_id, zoom, range).await?)
    }
    .instrument(span)
    .await
}
