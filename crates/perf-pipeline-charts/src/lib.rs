// crates/perf-pipeline-charts/src/lib.rs
// ============================================================================
// Module: Pipeline Charts
// Description: SVG rendering of department histograms and scatter plots.
// Purpose: Presentation-only views over the in-memory performance table.
// Dependencies: perf-pipeline-core, plotters, thiserror
// ============================================================================

//! ## Overview
//! [`SvgChartRenderer`] implements the core `ChartSink` contract by writing
//! one SVG file per chart. Binning lives in core; this crate only draws.

pub mod labels;
pub mod renderer;

pub use labels::ChartLabels;
pub use labels::ScatterLabels;
pub use renderer::ChartError;
pub use renderer::SvgChartRenderer;
pub use renderer::histogram_file_name;
pub use renderer::scatter_file_name;
