// crates/perf-pipeline-charts/src/renderer.rs
// ============================================================================
// Module: SVG Chart Renderer
// Description: Histogram and scatter rendering into SVG files.
// Purpose: Produce the department histogram and the two scatter plots.
// Dependencies: perf-pipeline-core, plotters, thiserror
// ============================================================================

//! ## Overview
//! Each chart is written to its own file under the output directory:
//! `histogram_<department>.svg` and `scatter_<x>_vs_<y>.svg`. Bars carry
//! black edges; bars and points are drawn with 0.7 opacity. Rendering never
//! touches the table beyond reading it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use perf_pipeline_core::ChartArtifact;
use perf_pipeline_core::ChartSink;
use perf_pipeline_core::ChartSinkError;
use perf_pipeline_core::DEFAULT_BIN_COUNT;
use perf_pipeline_core::HistogramBins;
use perf_pipeline_core::NumericField;
use perf_pipeline_core::PerformanceTable;
use plotters::prelude::BLACK;
use plotters::prelude::ChartBuilder;
use plotters::prelude::Circle;
use plotters::prelude::Color;
use plotters::prelude::IntoDrawingArea;
use plotters::prelude::RGBColor;
use plotters::prelude::Rectangle;
use plotters::prelude::SVGBackend;
use plotters::prelude::WHITE;
use thiserror::Error;

use crate::labels::ChartLabels;
use crate::labels::ScatterLabels;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default chart width in pixels.
const DEFAULT_WIDTH: u32 = 800;
/// Default chart height in pixels.
const DEFAULT_HEIGHT: u32 = 600;
/// Fill color for bars and points.
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
/// Opacity for bars and points.
const SERIES_ALPHA: f64 = 0.7;
/// Scatter point radius in pixels.
const POINT_RADIUS: u32 = 4;
/// Caption font size.
const CAPTION_FONT_SIZE: u32 = 20;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Chart rendering errors.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Output directory or file could not be written.
    #[error("chart io error: {0}")]
    Io(String),
    /// The plotting backend failed.
    #[error("chart render error: {0}")]
    Render(String),
}

impl From<ChartError> for ChartSinkError {
    fn from(error: ChartError) -> Self {
        Self(error.to_string())
    }
}

// ============================================================================
// SECTION: File Names
// ============================================================================

/// Returns the histogram file name for `department`.
///
/// `[A-Za-z0-9-]` is kept as-is. Every other UTF-8 byte, `_` included, is
/// written as `_` plus two uppercase hex digits, so distinct departments
/// never share a file.
#[must_use]
pub fn histogram_file_name(department: &str) -> String {
    let mut safe = String::with_capacity(department.len());
    for byte in department.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            safe.push(char::from(byte));
        } else {
            let _ = write!(safe, "_{byte:02X}");
        }
    }
    format!("histogram_{safe}.svg")
}

/// Returns the scatter file name for an `x` vs. `y` plot.
#[must_use]
pub fn scatter_file_name(x: NumericField, y: NumericField) -> String {
    format!("scatter_{}_vs_{}.svg", short_name(x), short_name(y))
}

/// Short field name used in file names.
const fn short_name(field: NumericField) -> &'static str {
    match field {
        NumericField::EmployeeId => "employee_id",
        NumericField::PerformanceScore => "performance",
        NumericField::YearsWithCompany => "years",
        NumericField::Salary => "salary",
    }
}

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Writes charts as SVG files into one output directory.
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    /// Directory receiving chart files.
    output_dir: PathBuf,
    /// Chart width in pixels.
    width: u32,
    /// Chart height in pixels.
    height: u32,
    /// Titles and axis labels.
    labels: ChartLabels,
}

impl SvgChartRenderer {
    /// Creates a renderer writing into `output_dir` with default size and
    /// English labels.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            labels: ChartLabels::default(),
        }
    }

    /// Sets the chart size in pixels.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replaces the chart labels.
    #[must_use]
    pub fn with_labels(mut self, labels: ChartLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the labels in use.
    #[must_use]
    pub const fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    /// Renders the performance histogram of `department` (10 bins).
    ///
    /// A department with no records renders an empty chart.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] when the file cannot be written.
    pub fn histogram(
        &self,
        table: &PerformanceTable,
        department: &str,
    ) -> Result<PathBuf, ChartError> {
        let scores: Vec<f64> =
            table.in_department(department).map(|record| record.performance_score).collect();
        let bins = HistogramBins::compute(&scores, DEFAULT_BIN_COUNT);
        let path = self.prepare_path(&histogram_file_name(department))?;
        let caption = self.labels.histogram_caption(department);
        draw_histogram(
            &path,
            (self.width, self.height),
            &caption,
            &self.labels.performance,
            &self.labels.frequency,
            &bins,
        )?;
        Ok(path)
    }

    /// Renders a scatter plot of `x` against `y` over every record.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] when the file cannot be written.
    pub fn scatter(
        &self,
        table: &PerformanceTable,
        x: NumericField,
        y: NumericField,
        labels: &ScatterLabels,
    ) -> Result<PathBuf, ChartError> {
        let points: Vec<(f64, f64)> =
            table.records().iter().map(|record| (record.numeric(x), record.numeric(y))).collect();
        let path = self.prepare_path(&scatter_file_name(x, y))?;
        draw_scatter(&path, (self.width, self.height), labels, &points)?;
        Ok(path)
    }

    /// Ensures the output directory exists and returns the file path.
    fn prepare_path(&self, file_name: &str) -> Result<PathBuf, ChartError> {
        fs::create_dir_all(&self.output_dir).map_err(|err| {
            ChartError::Io(format!("{}: {err}", self.output_dir.display()))
        })?;
        Ok(self.output_dir.join(file_name))
    }
}

impl ChartSink for SvgChartRenderer {
    fn histogram(
        &mut self,
        table: &PerformanceTable,
        department: &str,
    ) -> Result<ChartArtifact, ChartSinkError> {
        let path = Self::histogram(self, table, department)?;
        Ok(ChartArtifact {
            path,
        })
    }

    fn scatter(
        &mut self,
        table: &PerformanceTable,
        x: NumericField,
        y: NumericField,
    ) -> Result<ChartArtifact, ChartSinkError> {
        let labels = self.labels.scatter(x, y);
        let path = Self::scatter(self, table, x, y, &labels)?;
        Ok(ChartArtifact {
            path,
        })
    }
}

// ============================================================================
// SECTION: Drawing
// ============================================================================

/// Draws a histogram with black-edged translucent bars.
fn draw_histogram(
    path: &Path,
    size: (u32, u32),
    caption: &str,
    x_label: &str,
    y_label: &str,
    bins: &HistogramBins,
) -> Result<(), ChartError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let (low, high) = bins.range();
    let y_max = as_f64(bins.max_count().max(1)) * 1.1;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", CAPTION_FONT_SIZE))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(low .. high, 0.0 .. y_max)
        .map_err(render_error)?;
    chart.configure_mesh().x_desc(x_label).y_desc(y_label).draw().map_err(render_error)?;
    let fill = SERIES_COLOR.mix(SERIES_ALPHA).filled();
    chart
        .draw_series(bins.bins.iter().map(|bin| {
            Rectangle::new([(bin.lower, 0.0), (bin.upper, as_f64(bin.count))], fill)
        }))
        .map_err(render_error)?;
    let edge = BLACK.stroke_width(1);
    chart
        .draw_series(bins.bins.iter().map(|bin| {
            Rectangle::new([(bin.lower, 0.0), (bin.upper, as_f64(bin.count))], edge)
        }))
        .map_err(render_error)?;
    root.present().map_err(render_error)?;
    Ok(())
}

/// Draws a scatter plot with translucent points.
fn draw_scatter(
    path: &Path,
    size: (u32, u32),
    labels: &ScatterLabels,
    points: &[(f64, f64)],
) -> Result<(), ChartError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let (x_low, x_high) = axis_range(points.iter().map(|point| point.0));
    let (y_low, y_high) = axis_range(points.iter().map(|point| point.1));
    let mut chart = ChartBuilder::on(&root)
        .caption(&labels.title, ("sans-serif", CAPTION_FONT_SIZE))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_low .. x_high, y_low .. y_high)
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_desc(labels.x_label.as_str())
        .y_desc(labels.y_label.as_str())
        .draw()
        .map_err(render_error)?;
    let style = SERIES_COLOR.mix(SERIES_ALPHA).filled();
    chart
        .draw_series(points.iter().map(|point| Circle::new(*point, POINT_RADIUS, style)))
        .map_err(render_error)?;
    root.present().map_err(render_error)?;
    Ok(())
}

/// Returns a padded axis range covering `values`.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Converts a count to `f64` for plotting.
#[allow(clippy::cast_precision_loss, reason = "Bin counts stay far below 2^52.")]
const fn as_f64(value: usize) -> f64 {
    value as f64
}

/// Maps a backend failure into a render error.
fn render_error(err: impl Display) -> ChartError {
    ChartError::Render(err.to_string())
}
