/*!
 * Gantt Module
 * Single-core occupancy chart from a context-switch trace
 */

pub mod layout;
pub mod occupancy;
pub mod palette;
pub mod render;

// Re-export public API
pub use layout::{Bar, ChartLayout, LegendEntry};
pub use occupancy::{OccupancyInterval, OccupancyTrace};
pub use palette::{Palette, Rgb, TABLEAU_10};
pub use render::render_png;

use crate::config::VisualizerConfig;
use crate::errors::GanttResult;
use crate::trace::OccupancyGrammar;
use tracing::instrument;

/// Parse the configured trace and write its chart
#[instrument(skip_all, fields(input = %config.input.display(), end_ms = config.end_ms))]
pub fn run(config: &VisualizerConfig) -> GanttResult<ChartLayout> {
    let grammar = OccupancyGrammar::compile(&config.grammar)?;
    let trace = OccupancyTrace::from_file(&config.input, &grammar, config.end_ms, config.mode)?;

    let layout =
        ChartLayout::from_trace(&trace, &Palette::tableau())?.with_title(config.title.clone());
    render_png(&layout, &config.output, (config.width, config.height))?;
    Ok(layout)
}
