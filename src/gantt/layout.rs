/*!
 * Chart Layout
 * Backend-independent bars and legend for a single-row occupancy chart
 */

use super::occupancy::OccupancyTrace;
use super::palette::{Palette, Rgb};
use crate::errors::GanttResult;
use crate::trace::{TaskId, Tick};
use serde::Serialize;
use std::collections::BTreeSet;

/// One horizontal bar on the shared row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub task: TaskId,
    pub left: Tick,
    pub width: Tick,
    pub color: Rgb,
}

impl Bar {
    #[inline]
    pub const fn right(&self) -> Tick {
        self.left + self.width
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub task: TaskId,
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    pub bars: Vec<Bar>,
    /// One entry per distinct task, ascending by id
    pub legend: Vec<LegendEntry>,
    /// Visible time span, never empty
    pub x_range: (Tick, Tick),
    pub title: Option<String>,
}

impl ChartLayout {
    /// Lay out one bar per occupancy interval
    ///
    /// Bars and legend swatches both take their colour from `palette`.
    pub fn from_trace(trace: &OccupancyTrace, palette: &Palette) -> GanttResult<Self> {
        let bars: Vec<Bar> = trace
            .intervals()?
            .into_iter()
            .map(|interval| Bar {
                task: interval.task,
                left: interval.start,
                width: interval.width(),
                color: palette.color_for(interval.task),
            })
            .collect();

        let tasks: BTreeSet<TaskId> = bars.iter().map(|bar| bar.task).collect();
        let legend = tasks
            .into_iter()
            .map(|task| LegendEntry {
                task,
                label: format!("Task {}", task),
                color: palette.color_for(task),
            })
            .collect();

        let start = bars.first().map(|bar| bar.left).unwrap_or(trace.end);
        let end = trace.end.max(start.saturating_add(1));

        Ok(Self {
            bars,
            legend,
            x_range: (start, end),
            title: None,
        })
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Bars belonging to `task`, in time order
    pub fn bars_for(&self, task: TaskId) -> impl Iterator<Item = &Bar> + '_ {
        self.bars.iter().filter(move |bar| bar.task == task)
    }
}
