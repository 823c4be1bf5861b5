/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::trace::{EventKind, TaskId, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Line parsing errors with serialization support
///
/// Only raised in strict mode or while compiling a grammar. Lenient parsing
/// never fails on content.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ParseError {
    #[error("{path}:{line}: malformed trace line {text:?}")]
    #[diagnostic(
        code(parse::malformed_line),
        help("The line is inside the scanned region but does not match the grammar. Rerun without --strict to skip it.")
    )]
    MalformedLine {
        path: String,
        line: usize,
        text: String,
    },

    #[error("{path}:{line}: unknown event keyword {keyword:?}")]
    #[diagnostic(
        code(parse::unknown_keyword),
        help("Recognised keywords are START, END and ARRIVE.")
    )]
    UnknownKeyword {
        path: String,
        line: usize,
        keyword: String,
    },

    #[error("Invalid line pattern {pattern:?}: {reason}")]
    #[diagnostic(
        code(parse::invalid_pattern),
        help("Custom patterns must be valid regular expressions defining the named groups `tick` and `task`.")
    )]
    InvalidPattern { pattern: String, reason: String },
}

/// Aggregate report errors
#[derive(Error, Debug, Diagnostic)]
pub enum ReportError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(
        code(report::io),
        help("Check that the trace directory exists and every entry in it is a readable file.")
    )]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Set length verification failed: task {task} has {found} {kind} records, expected {expected}")]
    #[diagnostic(
        code(report::inconsistent_sets),
        help("Every task needs exactly one ARRIVE, START and END record per benchmark run. Look for truncated trace files.")
    )]
    Inconsistent {
        task: TaskId,
        kind: EventKind,
        expected: usize,
        found: usize,
    },

    #[error("Task count {tasks} exceeds the task id range")]
    #[diagnostic(
        code(report::too_many_tasks),
        help("Task ids are 32-bit; pass a smaller --tasks value.")
    )]
    TooManyTasks { tasks: usize },

    #[error("No sample sets found in {path}")]
    #[diagnostic(
        code(report::empty_corpus),
        help("Trace files must contain OUTPUT START / OUTPUT END regions with `<ms> ms | <KIND> task<id>` lines.")
    )]
    EmptyCorpus { path: String },

    #[error("Parse error: {0}")]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Gantt chart errors
#[derive(Error, Debug, Diagnostic)]
pub enum GanttError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(gantt::io), help("Check the trace file path."))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Task {task} interval runs backwards: starts at {start} ms, next boundary at {end} ms")]
    #[diagnostic(
        code(gantt::time_regression),
        help("Trace ticks must be non-decreasing and the end time must not precede the last event.")
    )]
    TimeRegression { task: TaskId, start: Tick, end: Tick },

    #[error("Failed to render chart to {path}: {reason}")]
    #[diagnostic(
        code(gantt::render_failed),
        help("Check that the output directory exists and is writable.")
    )]
    Render { path: String, reason: String },

    #[error("Parse error: {0}")]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// Configuration loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    #[diagnostic(code(config::io))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    #[diagnostic(
        code(config::invalid_json),
        help("The config file must be a JSON object matching the visualizer settings.")
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing trace end time")]
    #[diagnostic(
        code(config::missing_end_time),
        help("Pass --end <MS> or set `end_ms` in the config file. It closes the last occupancy interval.")
    )]
    MissingEndTime,

    #[error("Missing input trace file")]
    #[diagnostic(
        code(config::missing_input),
        help("Pass --input <FILE> or set `input` in the config file.")
    )]
    MissingInput,

    #[error("Invalid value: {0}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue(String),
}

pub type ParseResult<T> = Result<T, ParseError>;
pub type ReportResult<T> = Result<T, ReportError>;
pub type GanttResult<T> = Result<T, GanttError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
