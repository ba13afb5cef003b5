//! Gantt chart time-column math.
//!
//! Columns are half-open `[start, end)` date ranges aligned to the zoom unit
//! (days, ISO weeks starting Monday, calendar months). A task occupies its
//! start date through its end date inclusive, so a one-day task spans exactly
//! one day column.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TaskId;
use crate::records::Task;

/// Upper bound on generated columns.
pub const MAX_COLUMNS: usize = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("task {task_id} ends before it starts")]
    EndBeforeStart { task_id: TaskId },
    #[error("view range ends before it starts")]
    InvalidRange,
    #[error("view range needs more than {max} columns")]
    TooManyColumns { max: usize },
    #[error("date out of range")]
    OutOfRange,
    #[error("no task has a start and end date")]
    NothingScheduled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zoom {
    Day,
    #[default]
    Week,
    Month,
}

impl Zoom {
    /// First day of the column containing `date`.
    fn align(self, date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        match self {
            Zoom::Day => Ok(date),
            Zoom::Week => Ok(date.week(Weekday::Mon).first_day()),
            Zoom::Month => date.with_day(1).ok_or(ScheduleError::OutOfRange),
        }
    }

    /// First day of the column after the one starting at `start`.
    fn step(self, start: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        let next = match self {
            Zoom::Day => start.checked_add_days(Days::new(1)),
            Zoom::Week => start.checked_add_days(Days::new(7)),
            Zoom::Month => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
            }
        };
        next.ok_or(ScheduleError::OutOfRange)
    }

    fn label(self, start: NaiveDate) -> String {
        match self {
            Zoom::Day | Zoom::Week => start.format("%b %-d").to_string(),
            Zoom::Month => start.format("%b %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeColumn {
    pub start: NaiveDate,
    /// Exclusive.
    pub end: NaiveDate,
    pub label: String,
}

impl TimeColumn {
    fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Ordered columns covering `first..=last`, padded out to whole columns.
pub fn time_columns(
    first: NaiveDate,
    last: NaiveDate,
    zoom: Zoom,
) -> Result<Vec<TimeColumn>, ScheduleError> {
    if last < first {
        return Err(ScheduleError::InvalidRange);
    }
    let mut columns = Vec::new();
    let mut start = zoom.align(first)?;
    while start <= last {
        if columns.len() == MAX_COLUMNS {
            return Err(ScheduleError::TooManyColumns { max: MAX_COLUMNS });
        }
        let end = zoom.step(start)?;
        columns.push(TimeColumn {
            start,
            end,
            label: zoom.label(start),
        });
        start = end;
    }
    Ok(columns)
}

/// Horizontal placement of a task, in fractional column units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GanttBar {
    pub offset: f64,
    pub span: f64,
    /// The task starts before the visible range.
    pub clipped_start: bool,
    /// The task ends after the visible range.
    pub clipped_end: bool,
}

/// Fractional column position of `date` (a column boundary or a day inside one).
fn position(columns: &[TimeColumn], date: NaiveDate) -> f64 {
    for (index, column) in columns.iter().enumerate() {
        if date < column.end {
            let into = (date - column.start).num_days().max(0) as f64;
            return index as f64 + into / column.days() as f64;
        }
    }
    columns.len() as f64
}

/// Place a `start..=end` span on the columns, or `None` when it falls wholly outside.
pub fn place_bar(
    columns: &[TimeColumn],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<GanttBar>, ScheduleError> {
    if end < start {
        return Err(ScheduleError::InvalidRange);
    }
    let (Some(first), Some(last)) = (columns.first(), columns.last()) else {
        return Ok(None);
    };
    let end_exclusive = end
        .checked_add_days(Days::new(1))
        .ok_or(ScheduleError::OutOfRange)?;
    let visible_start = start.max(first.start);
    let visible_end = end_exclusive.min(last.end);
    if visible_start >= visible_end {
        return Ok(None);
    }
    let offset = position(columns, visible_start);
    let span = position(columns, visible_end) - offset;
    Ok(Some(GanttBar {
        offset,
        span,
        clipped_start: start < first.start,
        clipped_end: end_exclusive > last.end,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttRow {
    pub task_id: TaskId,
    pub title: String,
    /// `None` for undated tasks and tasks outside the view.
    pub bar: Option<GanttBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttChart {
    pub zoom: Zoom,
    pub columns: Vec<TimeColumn>,
    pub rows: Vec<GanttRow>,
}

/// Earliest start through latest end across dated tasks.
pub fn default_range(tasks: &[Task]) -> Result<(NaiveDate, NaiveDate), ScheduleError> {
    let mut range: Option<(NaiveDate, NaiveDate)> = None;
    for task in tasks {
        if let (Some(start), Some(end)) = (task.start_date, task.end_date) {
            if end < start {
                return Err(ScheduleError::EndBeforeStart {
                    task_id: task.id.clone(),
                });
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(start), hi.max(end)),
                None => (start, end),
            });
        }
    }
    range.ok_or(ScheduleError::NothingScheduled)
}

impl GanttChart {
    /// Lay out `tasks` over `range` (or the default range) at `zoom`.
    pub fn build(
        tasks: &[Task],
        zoom: Zoom,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Self, ScheduleError> {
        let (first, last) = match range {
            Some(range) => range,
            None => default_range(tasks)?,
        };
        let columns = time_columns(first, last, zoom)?;
        let rows = tasks
            .iter()
            .map(|task| {
                let bar = match (task.start_date, task.end_date) {
                    (Some(start), Some(end)) => {
                        if end < start {
                            return Err(ScheduleError::EndBeforeStart {
                                task_id: task.id.clone(),
                            });
                        }
                        place_bar(&columns, start, end)?
                    }
                    _ => None,
                };
                Ok(GanttRow {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    bar,
                })
            })
            .collect::<Result<Vec<_>, ScheduleError>>()?;
        Ok(Self {
            zoom,
            columns,
            rows,
        })
    }
}
