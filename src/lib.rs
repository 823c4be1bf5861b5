/*!
 * RTOS Trace Tools Library
 * Offline analysis of scheduler benchmark traces
 */

pub mod config;
pub mod errors;
pub mod gantt;
pub mod logging;
pub mod report;
pub mod trace;

// Re-exports
pub use config::{ReportConfig, VisualizerConfig, VisualizerSettings};
pub use errors::*;
pub use gantt::{ChartLayout, OccupancyTrace, Palette};
pub use logging::init_tracing;
pub use report::{Summary, TaskTimelines};
pub use trace::{EventKind, GrammarSpec, OccupancyEvent, ParseMode, TaskId, Tick};
