/*!
 * Chart Rendering
 * Draws a chart layout to a PNG with plotters
 */

use super::layout::ChartLayout;
use crate::errors::{GanttError, GanttResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;
use tracing::info;

const FONT: &str = "sans-serif";
const LEGEND_ROW_PX: i32 = 18;
const LEGEND_COLUMN_PX: u32 = 96;
const SWATCH_PX: i32 = 12;
const PAD_PX: i32 = 8;

/// Bar extent on the hidden y axis
const BAR_BOTTOM: f64 = 0.1;
const BAR_TOP: f64 = 0.9;

/// Render `layout` to `path`, replacing any existing file
pub fn render_png(layout: &ChartLayout, path: &Path, size: (u32, u32)) -> GanttResult<()> {
    draw(layout, path, size).map_err(|e| GanttError::Render {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    info!(
        path = %path.display(),
        width = size.0,
        height = size.1,
        bars = layout.bars.len(),
        "Chart written"
    );
    Ok(())
}

/// Legend rows that fit into `height` pixels, at least one
fn legend_rows(height: u32) -> usize {
    ((height as i32 - 2 * PAD_PX) / LEGEND_ROW_PX).max(1) as usize
}

fn legend_columns(entries: usize, height: u32) -> u32 {
    entries.div_ceil(legend_rows(height)) as u32
}

fn draw(layout: &ChartLayout, path: &Path, size: (u32, u32)) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let legend_width = (legend_columns(layout.legend.len(), size.1) * LEGEND_COLUMN_PX)
        .min(size.0 / 3);
    let (plot_area, legend_area) = root.split_horizontally((size.0 - legend_width) as i32);

    draw_bars(layout, &plot_area)?;
    draw_legend(layout, &legend_area, size.1)?;

    root.present()?;
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    layout: &ChartLayout,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (x0, x1) = layout.x_range;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(PAD_PX)
        .x_label_area_size(32)
        .y_label_area_size(0);
    if let Some(title) = &layout.title {
        builder.caption(title, (FONT, 16));
    }
    let mut chart = builder.build_cartesian_2d(x0 as f64..x1 as f64, 0.0f64..1.0f64)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_desc("Time (ms)")
        .x_labels(10)
        .draw()?;

    // One series per task so each colour comes from the legend entry
    for entry in &layout.legend {
        let color = RGBColor::from(entry.color);
        chart.draw_series(layout.bars_for(entry.task).map(|bar| {
            Rectangle::new(
                [
                    (bar.left as f64, BAR_BOTTOM),
                    (bar.right() as f64, BAR_TOP),
                ],
                color.filled(),
            )
        }))?;
    }

    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    layout: &ChartLayout,
    area: &DrawingArea<DB, Shift>,
    height: u32,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    if layout.legend.is_empty() {
        return Ok(());
    }

    let rows = legend_rows(height);
    let style = TextStyle::from((FONT, 13).into_font()).color(&BLACK);

    for (index, entry) in layout.legend.iter().enumerate() {
        let column = (index / rows) as i32;
        let row = (index % rows) as i32;
        let x = PAD_PX + column * LEGEND_COLUMN_PX as i32;
        let y = PAD_PX + row * LEGEND_ROW_PX;

        area.draw(&Rectangle::new(
            [(x, y), (x + SWATCH_PX, y + SWATCH_PX)],
            RGBColor::from(entry.color).filled(),
        ))?;
        area.draw(&Text::new(
            entry.label.as_str(),
            (x + SWATCH_PX + 6, y),
            style.clone(),
        ))?;
    }

    Ok(())
}
