/*!
 * Trace Module
 * Line grammars and region scanning for scheduler trace logs
 */

pub mod grammar;
pub mod region;
pub mod types;

// Re-export public API
pub use grammar::{
    parse_report_line, GrammarKind, GrammarSpec, OccupancyGrammar, ReportLine,
    DEFAULT_WORKER_PREFIX, REPORT_PATTERN,
};
pub use region::{RegionLine, RegionScanner, OUTPUT_END, OUTPUT_START};
pub use types::{Event, EventKind, OccupancyEvent, ParseMode, ParseStats, TaskId, Tick};
