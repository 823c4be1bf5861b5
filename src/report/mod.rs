/*!
 * Report Module
 * Aggregate schedule statistics across a directory of benchmark traces
 */

pub mod metrics;
pub mod timeline;

// Re-export public API
pub use metrics::{average_makespan, average_response, average_turnaround, summarize, Summary};
pub use timeline::{TaskSeries, TaskTimelines, MAX_TASKS};

use crate::config::ReportConfig;
use crate::errors::ReportResult;
use tracing::instrument;

/// Load every trace in `config.dir` and compute the summary
#[instrument(skip_all, fields(dir = %config.dir.display(), mode = config.mode.as_str()))]
pub fn run(config: &ReportConfig) -> ReportResult<Summary> {
    let timelines = TaskTimelines::from_dir(&config.dir, config.mode)?;
    summarize(&timelines, config.tasks, &config.dir.display().to_string())
}
