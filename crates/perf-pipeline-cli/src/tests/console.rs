// crates/perf-pipeline-cli/src/tests/console.rs
// ============================================================================
// Module: CLI Console Tests
// Description: Unit tests for status lines and report rendering.
// Purpose: Ensure console output follows pipeline order and report layout.
// Dependencies: perf-pipeline-cli console module, perf-pipeline-core
// ============================================================================

//! ## Overview
//! Feeds pipeline events into [`ConsoleObserver`] over an in-memory buffer.
//! Tests run under the default English locale.

use std::path::PathBuf;

use perf_pipeline_core::ChartArtifact;
use perf_pipeline_core::EmployeeRecord;
use perf_pipeline_core::PerformanceTable;
use perf_pipeline_core::PipelineEvent;
use perf_pipeline_core::PipelineObserver;
use perf_pipeline_core::StatisticsReport;
use perf_pipeline_core::TableName;

use crate::console::ConsoleObserver;
use crate::console::localized_chart_labels;
use crate::console::render_report_lines;

fn record(department: &str, performance: f64, years: i64, salary: f64) -> EmployeeRecord {
    EmployeeRecord {
        id: None,
        employee_id: 1,
        department: department.to_string(),
        performance_score: performance,
        years_with_company: years,
        salary,
    }
}

fn two_row_report() -> StatisticsReport {
    StatisticsReport::compute(&PerformanceTable::new(vec![
        record("Marketing", 85.5, 3, 55_000.0),
        record("Sales", 70.0, 5, 48_000.0),
    ]))
}

#[test]
fn status_lines_follow_event_order() {
    let table = TableName::default();
    let report = two_row_report();
    let artifact = ChartArtifact {
        path: PathBuf::from("charts/histogram_Marketing.svg"),
    };
    let mut observer = ConsoleObserver::status_only(Vec::new());
    for event in [
        PipelineEvent::DataLoaded {
            rows: 2,
        },
        PipelineEvent::Connected,
        PipelineEvent::TableDropped {
            table: &table,
        },
        PipelineEvent::TableCreated {
            table: &table,
        },
        PipelineEvent::DataInserted {
            rows: 2,
        },
        PipelineEvent::Statistics(&report),
        PipelineEvent::ChartWritten(&artifact),
    ] {
        observer.on_event(event).unwrap();
    }
    let output = String::from_utf8(observer.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Data loaded (2 records).",
            "Connection established.",
            "Table 'EmployeePerformance' dropped (if it existed).",
            "Table 'EmployeePerformance' created successfully.",
            "Data inserted successfully (2 rows).",
            "Chart written to charts/histogram_Marketing.svg",
        ]
    );
}

#[test]
fn report_renders_blocks_in_fixed_order() {
    let lines = render_report_lines(&two_row_report());
    assert_eq!(lines[0], "Mean, median and standard deviation of performance:");
    assert_eq!(lines[1], "  mean: 77.75");
    assert_eq!(lines[2], "  median: 77.75");
    assert_eq!(lines[4], "Mean, median and standard deviation of salary:");
    assert_eq!(lines[5], "  mean: 51500");
    assert_eq!(lines[8], "Total number of employees per department:");
    assert_eq!(lines[9], "  Marketing: 1");
    assert_eq!(lines[10], "  Sales: 1");
    assert_eq!(lines[11], "Correlation between years with the company and performance:");
    assert_eq!(lines[12], "  -1");
    assert_eq!(lines[13], "Correlation between salary and performance:");
    assert_eq!(lines[14], "  1");
    assert_eq!(lines.len(), 15);
}

#[test]
fn empty_report_prints_nan_and_placeholder() {
    let lines = render_report_lines(&StatisticsReport::compute(&PerformanceTable::default()));
    assert_eq!(lines[1], "  mean: NaN");
    assert_eq!(lines[9], "  (no departments)");
}

#[test]
fn full_observer_includes_report() {
    let report = two_row_report();
    let mut observer = ConsoleObserver::new(Vec::new());
    observer.on_event(PipelineEvent::Statistics(&report)).unwrap();
    let output = String::from_utf8(observer.into_inner()).unwrap();
    assert!(output.starts_with("Mean, median and standard deviation of performance:"));
}

#[test]
fn chart_labels_keep_department_placeholder() {
    let labels = localized_chart_labels();
    assert_eq!(labels.histogram_caption("Sales"), "Performance histogram for the Sales department");
    assert_eq!(labels.frequency, "Frequency");
}
