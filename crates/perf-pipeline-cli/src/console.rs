// crates/perf-pipeline-cli/src/console.rs
// ============================================================================
// Module: CLI Console Output
// Description: Progress observer and statistics report rendering.
// Purpose: Turn pipeline events into localized console lines.
// Dependencies: perf-pipeline-charts, perf-pipeline-core
// ============================================================================

//! ## Overview
//! [`ConsoleObserver`] writes one localized status line per pipeline event.
//! The statistics report is rendered in a fixed order: performance block,
//! salary block, department counts, then the two correlations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use perf_pipeline_charts::ChartLabels;
use perf_pipeline_core::PipelineEvent;
use perf_pipeline_core::PipelineObserver;
use perf_pipeline_core::StatisticsReport;
use perf_pipeline_core::SummaryStatistics;

use crate::t;

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Writes pipeline progress to a console stream.
pub struct ConsoleObserver<W: Write> {
    /// Destination stream.
    out: W,
    /// Whether the statistics report is rendered as text.
    render_report: bool,
}

impl<W: Write> ConsoleObserver<W> {
    /// Creates an observer that also renders the text report.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            render_report: true,
        }
    }

    /// Creates an observer that prints status lines only.
    pub const fn status_only(out: W) -> Self {
        Self {
            out,
            render_report: false,
        }
    }

    /// Consumes the observer and returns the stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one line.
    fn line(&mut self, message: &str) -> Result<(), String> {
        writeln!(self.out, "{message}").map_err(|err| err.to_string())
    }
}

impl<W: Write> PipelineObserver for ConsoleObserver<W> {
    fn on_event(&mut self, event: PipelineEvent<'_>) -> Result<(), String> {
        match event {
            PipelineEvent::DataLoaded {
                rows,
            } => self.line(&t!("pipeline.data_loaded", rows = rows)),
            PipelineEvent::Connected => self.line(&t!("pipeline.connected")),
            PipelineEvent::TableDropped {
                table,
            } => self.line(&t!("pipeline.table_dropped", table = table)),
            PipelineEvent::TableCreated {
                table,
            } => self.line(&t!("pipeline.table_created", table = table)),
            PipelineEvent::DataInserted {
                rows,
            } => self.line(&t!("pipeline.data_inserted", rows = rows)),
            PipelineEvent::Statistics(report) => {
                if !self.render_report {
                    return Ok(());
                }
                for line in render_report_lines(report) {
                    self.line(&line)?;
                }
                Ok(())
            }
            PipelineEvent::ChartWritten(artifact) => {
                self.line(&t!("pipeline.chart_written", path = artifact.path.display()))
            }
        }
    }
}

// ============================================================================
// SECTION: Report Rendering
// ============================================================================

/// Renders the statistics report as localized lines in fixed order.
#[must_use]
pub fn render_report_lines(report: &StatisticsReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(t!("report.performance.header"));
    push_summary(&mut lines, &report.performance);
    lines.push(t!("report.salary.header"));
    push_summary(&mut lines, &report.salary);
    lines.push(t!("report.departments.header"));
    if report.department_counts.is_empty() {
        lines.push(t!("report.departments.empty"));
    }
    for (department, count) in &report.department_counts {
        lines.push(t!("report.departments.line", department = department, count = count));
    }
    lines.push(t!("report.correlation.years"));
    lines.push(t!("report.value", value = report.years_performance_correlation));
    lines.push(t!("report.correlation.salary"));
    lines.push(t!("report.value", value = report.salary_performance_correlation));
    lines
}

/// Appends mean, median, and standard deviation lines.
fn push_summary(lines: &mut Vec<String>, summary: &SummaryStatistics) {
    lines.push(t!("report.mean", value = summary.mean));
    lines.push(t!("report.median", value = summary.median));
    lines.push(t!("report.std_dev", value = summary.std_dev));
}

// ============================================================================
// SECTION: Chart Labels
// ============================================================================

/// Builds chart labels from the active locale's catalog.
#[must_use]
pub fn localized_chart_labels() -> ChartLabels {
    ChartLabels {
        histogram_title: t!("chart.histogram.title"),
        performance: t!("chart.axis.performance"),
        frequency: t!("chart.axis.frequency"),
        years_with_company: t!("chart.axis.years"),
        salary: t!("chart.axis.salary"),
        years_vs_performance: t!("chart.scatter.years"),
        salary_vs_performance: t!("chart.scatter.salary"),
    }
}
