/*!
 * Per-Task Timelines
 * Collects ARRIVE/START/END timestamps per task across trace files
 */

use crate::errors::{ParseError, ReportError, ReportResult};
use crate::trace::{
    parse_report_line, Event, EventKind, ParseMode, ParseStats, RegionLine, RegionScanner,
    ReportLine, TaskId, Tick,
};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arrival, start and end timestamps of one task, in file-read order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSeries {
    pub arrivals: Vec<Tick>,
    pub starts: Vec<Tick>,
    pub ends: Vec<Tick>,
}

impl TaskSeries {
    pub fn get(&self, kind: EventKind) -> &[Tick] {
        match kind {
            EventKind::Arrive => &self.arrivals,
            EventKind::Start => &self.starts,
            EventKind::End => &self.ends,
        }
    }

    fn push(&mut self, kind: EventKind, time: Tick) {
        match kind {
            EventKind::Arrive => self.arrivals.push(time),
            EventKind::Start => self.starts.push(time),
            EventKind::End => self.ends.push(time),
        }
    }

    /// Signed distance from arrival to `to` in sample set `set`
    pub(crate) fn span(&self, set: usize, to: EventKind) -> i128 {
        let at = |kind: EventKind| self.get(kind).get(set).copied().unwrap_or(0) as i128;
        at(to) - at(EventKind::Arrive)
    }
}

const KINDS: [EventKind; 3] = [EventKind::Start, EventKind::End, EventKind::Arrive];

/// Largest task count whose ids all fit in [`TaskId`]
pub const MAX_TASKS: usize = TaskId::MAX as usize + 1;

/// Mismatch for a task id with no records at all
///
/// `next` is below [`MAX_TASKS`], so it always fits in a [`TaskId`].
fn missing_task(next: usize, sets: usize) -> ReportError {
    ReportError::Inconsistent {
        task: TaskId::try_from(next).unwrap_or(TaskId::MAX),
        kind: EventKind::Start,
        expected: sets,
        found: 0,
    }
}

/// Per-task timelines built from one or more trace files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTimelines {
    tasks: BTreeMap<TaskId, TaskSeries>,
}

impl TaskTimelines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event to its task's sequence
    pub fn record(&mut self, event: Event) {
        self.tasks
            .entry(event.task)
            .or_default()
            .push(event.kind, event.time);
    }

    pub fn task(&self, id: TaskId) -> Option<&TaskSeries> {
        self.tasks.get(&id)
    }

    /// Task count implied by the largest id seen
    pub fn task_count(&self) -> usize {
        self.tasks
            .keys()
            .next_back()
            .map(|&id| id as usize + 1)
            .unwrap_or(0)
    }

    /// Length of one task's sequence, zero for unseen tasks
    pub fn len_of(&self, task: TaskId, kind: EventKind) -> usize {
        self.tasks.get(&task).map(|s| s.get(kind).len()).unwrap_or(0)
    }

    /// Series of the seen tasks with ids below `tasks`, in id order
    pub(crate) fn series_below(&self, tasks: usize) -> impl Iterator<Item = &TaskSeries> + '_ {
        self.tasks
            .iter()
            .take_while(move |(&id, _)| (id as usize) < tasks)
            .map(|(_, series)| series)
    }

    /// Scan the output regions of one trace
    ///
    /// `source` only labels diagnostics. Region state starts closed.
    pub fn parse_reader<R: BufRead>(
        &mut self,
        reader: R,
        source: &str,
        mode: ParseMode,
    ) -> ReportResult<ParseStats> {
        let mut region = RegionScanner::new();
        let mut stats = ParseStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source_err| ReportError::Io {
                path: source.to_string(),
                source: source_err,
            })?;

            if region.classify(&line) != RegionLine::Inside {
                continue;
            }

            match parse_report_line(&line) {
                ReportLine::Event(event) => {
                    self.record(event);
                    stats.matched += 1;
                }
                ReportLine::UnknownKeyword(keyword) => {
                    if mode.is_strict() {
                        return Err(ParseError::UnknownKeyword {
                            path: source.to_string(),
                            line: index + 1,
                            keyword: keyword.to_string(),
                        }
                        .into());
                    }
                    stats.unknown_keyword += 1;
                }
                ReportLine::NoMatch => {
                    if mode.is_strict() {
                        return Err(ParseError::MalformedLine {
                            path: source.to_string(),
                            line: index + 1,
                            text: line.clone(),
                        }
                        .into());
                    }
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Scan one trace file
    pub fn parse_file(&mut self, path: &Path, mode: ParseMode) -> ReportResult<ParseStats> {
        let source_name = path.display().to_string();
        let file = File::open(path).map_err(|source| ReportError::Io {
            path: source_name.clone(),
            source,
        })?;

        let stats = self.parse_reader(BufReader::new(file), &source_name, mode)?;
        debug!(
            path = %source_name,
            matched = stats.matched,
            skipped = stats.skipped,
            unknown_keyword = stats.unknown_keyword,
            "Parsed trace file"
        );
        Ok(stats)
    }

    /// Scan every entry of `dir`, sorted by file name
    ///
    /// Not recursive and no extension filter. Any unreadable entry aborts.
    pub fn from_dir(dir: &Path, mode: ParseMode) -> ReportResult<Self> {
        let io_err = |source| ReportError::Io {
            path: dir.display().to_string(),
            source,
        };

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?;
        paths.sort();

        let mut timelines = Self::new();
        let mut total = ParseStats::default();
        for path in &paths {
            total.merge(timelines.parse_file(path, mode)?);
        }

        info!(
            dir = %dir.display(),
            files = paths.len(),
            events = total.matched,
            ignored = total.ignored(),
            "Loaded trace corpus"
        );
        Ok(timelines)
    }

    /// Number of sample sets, verifying every sequence has the same length
    ///
    /// The set count is the START count of task 0. Tasks checked are
    /// `0..expected_tasks`, or up to the largest id seen when `None`.
    pub fn sample_sets(&self, expected_tasks: Option<usize>) -> ReportResult<usize> {
        let sets = self.len_of(0, EventKind::Start);

        if sets == 0 {
            // Any stray record is a mismatch against the empty task 0
            for (&task, series) in &self.tasks {
                for kind in KINDS {
                    let found = series.get(kind).len();
                    if found != 0 {
                        return Err(ReportError::Inconsistent {
                            task,
                            kind,
                            expected: 0,
                            found,
                        });
                    }
                }
            }
            return Ok(0);
        }

        let tasks = expected_tasks.unwrap_or_else(|| self.task_count());
        if tasks > MAX_TASKS {
            return Err(ReportError::TooManyTasks { tasks });
        }

        // Every id below `tasks` must be present
        let mut next = 0usize;
        for (&task, series) in &self.tasks {
            if task as usize >= tasks {
                break;
            }
            if task as usize != next {
                return Err(missing_task(next, sets));
            }
            for kind in KINDS {
                let found = series.get(kind).len();
                if found != sets {
                    return Err(ReportError::Inconsistent {
                        task,
                        kind,
                        expected: sets,
                        found,
                    });
                }
            }
            next += 1;
        }
        if next < tasks {
            return Err(missing_task(next, sets));
        }

        Ok(sets)
    }
}
