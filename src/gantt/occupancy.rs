/*!
 * Core Occupancy
 * Context-switch events of one core and the intervals between them
 */

use crate::errors::{GanttError, GanttResult, ParseError};
use crate::trace::{OccupancyEvent, OccupancyGrammar, ParseMode, ParseStats, TaskId, Tick};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Span during which `task` held the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancyInterval {
    pub task: TaskId,
    pub start: Tick,
    pub end: Tick,
}

impl OccupancyInterval {
    #[inline]
    pub const fn width(&self) -> Tick {
        self.end - self.start
    }
}

/// Ordered occupancy events plus the trace end time
///
/// `end` closes the last interval and never becomes an interval itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyTrace {
    pub events: Vec<OccupancyEvent>,
    pub end: Tick,
}

impl OccupancyTrace {
    pub fn new(events: impl IntoIterator<Item = OccupancyEvent>, end: Tick) -> Self {
        Self {
            events: events.into_iter().collect(),
            end,
        }
    }

    /// Extract events from every matching line, in order
    pub fn parse_reader<R: BufRead>(
        reader: R,
        grammar: &OccupancyGrammar,
        end: Tick,
        source: &str,
        mode: ParseMode,
    ) -> GanttResult<(Self, ParseStats)> {
        let mut events = Vec::new();
        let mut stats = ParseStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| GanttError::Io {
                path: source.to_string(),
                source: e,
            })?;

            if let Some(event) = grammar.parse_line(&line) {
                events.push(event);
                stats.matched += 1;
                continue;
            }

            if OccupancyGrammar::in_scope(&line) {
                if mode.is_strict() {
                    return Err(ParseError::MalformedLine {
                        path: source.to_string(),
                        line: index + 1,
                        text: line,
                    }
                    .into());
                }
                stats.skipped += 1;
            }
        }

        Ok((Self { events, end }, stats))
    }

    pub fn from_file(
        path: &Path,
        grammar: &OccupancyGrammar,
        end: Tick,
        mode: ParseMode,
    ) -> GanttResult<Self> {
        let source_name = path.display().to_string();
        let file = File::open(path).map_err(|source| GanttError::Io {
            path: source_name.clone(),
            source,
        })?;

        let (trace, stats) = Self::parse_reader(BufReader::new(file), grammar, end, &source_name, mode)?;
        debug!(
            path = %source_name,
            pattern = grammar.as_str(),
            matched = stats.matched,
            skipped = stats.skipped,
            "Parsed occupancy trace"
        );
        Ok(trace)
    }

    /// Pair each event with the next boundary
    ///
    /// Fails if any boundary lies before the event it closes.
    pub fn intervals(&self) -> GanttResult<Vec<OccupancyInterval>> {
        let boundaries = self
            .events
            .iter()
            .skip(1)
            .map(|e| e.tick)
            .chain(std::iter::once(self.end));

        self.events
            .iter()
            .zip(boundaries)
            .map(|(event, boundary)| {
                if boundary < event.tick {
                    return Err(GanttError::TimeRegression {
                        task: event.task,
                        start: event.tick,
                        end: boundary,
                    });
                }
                Ok(OccupancyInterval {
                    task: event.task,
                    start: event.tick,
                    end: boundary,
                })
            })
            .collect()
    }
}
