/*!
 * Schedule Metrics
 * Makespan, turnaround and response time averaged over sample sets
 *
 * Records are paired by position: the i-th ARRIVE of a task belongs with its
 * i-th START and i-th END. No timestamp matching is attempted.
 */

use super::timeline::TaskTimelines;
use crate::errors::{ReportError, ReportResult};
use crate::trace::EventKind;
use serde::Serialize;
use std::fmt;

/// Averages over every sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub sets: usize,
    pub tasks: usize,
    pub average_makespan_ms: f64,
    pub average_turnaround_ms: f64,
    pub average_response_ms: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Discovered {} sets of data", self.sets)?;
        writeln!(f, "Average makespan: {:0.2}ms", self.average_makespan_ms)?;
        writeln!(f, "Average turnaround time: {:0.2}ms", self.average_turnaround_ms)?;
        write!(f, "Average response time: {:0.2}ms", self.average_response_ms)
    }
}

/// Mean over sets of the longest arrive-to-end span in the set
///
/// Spans below zero never win over the zero floor.
pub fn average_makespan(timelines: &TaskTimelines, sets: usize, tasks: usize) -> f64 {
    if sets == 0 {
        return 0.0;
    }

    let total: i128 = (0..sets)
        .map(|set| {
            timelines
                .series_below(tasks)
                .map(|series| series.span(set, EventKind::End))
                .fold(0, i128::max)
        })
        .sum();

    total as f64 / sets as f64
}

/// Mean arrive-to-end span over every (set, task)
pub fn average_turnaround(timelines: &TaskTimelines, sets: usize, tasks: usize) -> f64 {
    mean_span(timelines, sets, tasks, EventKind::End)
}

/// Mean arrive-to-start span over every (set, task)
pub fn average_response(timelines: &TaskTimelines, sets: usize, tasks: usize) -> f64 {
    mean_span(timelines, sets, tasks, EventKind::Start)
}

fn mean_span(timelines: &TaskTimelines, sets: usize, tasks: usize, to: EventKind) -> f64 {
    let samples = sets * tasks;
    if samples == 0 {
        return 0.0;
    }

    let total: i128 = timelines
        .series_below(tasks)
        .flat_map(|series| (0..sets).map(move |set| series.span(set, to)))
        .sum();

    total as f64 / samples as f64
}

/// Verify set lengths and compute all three averages
///
/// `expected_tasks` overrides the task count inferred from the largest id.
/// `source` labels the empty-corpus error.
pub fn summarize(
    timelines: &TaskTimelines,
    expected_tasks: Option<usize>,
    source: &str,
) -> ReportResult<Summary> {
    let sets = timelines.sample_sets(expected_tasks)?;
    let tasks = expected_tasks.unwrap_or_else(|| timelines.task_count());

    if sets == 0 || tasks == 0 {
        return Err(ReportError::EmptyCorpus {
            path: source.to_string(),
        });
    }

    Ok(Summary {
        sets,
        tasks,
        average_makespan_ms: average_makespan(timelines, sets, tasks),
        average_turnaround_ms: average_turnaround(timelines, sets, tasks),
        average_response_ms: average_response(timelines, sets, tasks),
    })
}
