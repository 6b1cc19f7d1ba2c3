// crates/perf-pipeline-charts/tests/render.rs
// ============================================================================
// Module: SVG Chart Renderer Tests
// Description: Render charts into scratch directories.
// Purpose: Ensure every chart lands on disk, including sparse departments.
// Dependencies: perf-pipeline-charts, perf-pipeline-core, tempfile
// ============================================================================

//! ## Overview
//! Renders the histogram and scatter plots from a small table and checks the
//! written SVG files.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use perf_pipeline_charts::ChartLabels;
use perf_pipeline_charts::SvgChartRenderer;
use perf_pipeline_charts::histogram_file_name;
use perf_pipeline_charts::scatter_file_name;
use perf_pipeline_core::ChartSink;
use perf_pipeline_core::NumericField;
use perf_pipeline_core::PerformanceTable;
use perf_pipeline_core::Pipeline;
use perf_pipeline_core::RecordingStore;
use perf_pipeline_core::load_table_from_str;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const DATA_JSON: &str = r#"[
    {"employee_id": 1, "department": "Marketing", "performance_score": 85.5,
     "years_with_company": 3, "salary": 55000},
    {"employee_id": 2, "department": "Sales", "performance_score": 70.0,
     "years_with_company": 5, "salary": 48000},
    {"employee_id": 3, "department": "Marketing", "performance_score": 91.0,
     "years_with_company": 8, "salary": 61000}
]"#;

fn table() -> PerformanceTable {
    load_table_from_str(DATA_JSON).unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn histogram_is_written_for_department() {
    let temp = TempDir::new().unwrap();
    let renderer = SvgChartRenderer::new(temp.path());

    let path = renderer.histogram(&table(), "Marketing").unwrap();

    assert_eq!(path, temp.path().join("histogram_Marketing.svg"));
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Performance histogram for the Marketing department"));
}

#[test]
fn absent_department_renders_empty_histogram() {
    let temp = TempDir::new().unwrap();
    let renderer = SvgChartRenderer::new(temp.path());
    let path = renderer.histogram(&table(), "Legal").unwrap();
    assert!(path.exists());
}

#[test]
fn scatter_uses_supplied_labels() {
    let temp = TempDir::new().unwrap();
    let renderer = SvgChartRenderer::new(temp.path().join("nested"));
    let labels =
        ChartLabels::default().scatter(NumericField::Salary, NumericField::PerformanceScore);

    let path = renderer
        .scatter(&table(), NumericField::Salary, NumericField::PerformanceScore, &labels)
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "scatter_salary_vs_performance.svg");
    assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
}

#[test]
fn spanish_labels_reach_the_file() {
    let temp = TempDir::new().unwrap();
    let labels = ChartLabels {
        histogram_title: "Histograma de rendimiento para el departamento de {department}"
            .to_string(),
        ..ChartLabels::default()
    };
    let renderer = SvgChartRenderer::new(temp.path()).with_size(640, 480).with_labels(labels);
    let path = renderer.histogram(&table(), "Sales").unwrap();
    let svg = fs::read_to_string(path).unwrap();
    assert!(svg.contains("departamento de Sales"));
}

#[test]
fn chart_sink_renders_all_pipeline_charts() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("Data.json");
    fs::write(&input, DATA_JSON).unwrap();
    let mut renderer = SvgChartRenderer::new(temp.path().join("charts"));
    let mut store = RecordingStore::new();

    let summary = Pipeline::default()
        .run(&input, || Ok(&mut store), Some(&mut renderer as &mut dyn ChartSink), &mut ())
        .unwrap();

    let names: Vec<String> = summary
        .charts
        .iter()
        .map(|chart| chart.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "histogram_Marketing.svg".to_string(),
            "scatter_years_vs_performance.svg".to_string(),
            "scatter_salary_vs_performance.svg".to_string(),
        ]
    );
    for chart in &summary.charts {
        assert!(chart.path.exists());
    }
}

#[test]
fn file_names_are_sanitized() {
    assert_eq!(histogram_file_name("R&D / Labs"), "histogram_R_26D_20_2F_20Labs.svg");
    assert_eq!(histogram_file_name("Marketing"), "histogram_Marketing.svg");
    assert_eq!(
        scatter_file_name(NumericField::YearsWithCompany, NumericField::PerformanceScore),
        "scatter_years_vs_performance.svg"
    );
}

#[test]
fn similar_departments_get_distinct_files() {
    assert_ne!(histogram_file_name("R&D"), histogram_file_name("R_D"));
    assert_ne!(histogram_file_name("Márketing"), histogram_file_name("M_rketing"));
    assert_eq!(histogram_file_name("R_D"), "histogram_R_5FD.svg");
    assert_eq!(histogram_file_name("Márketing"), "histogram_M_C3_A1rketing.svg");

    let temp = TempDir::new().unwrap();
    let renderer = SvgChartRenderer::new(temp.path());
    let first = renderer.histogram(&table(), "R&D").unwrap();
    let second = renderer.histogram(&table(), "R_D").unwrap();
    assert_ne!(first, second);
    assert!(first.exists() && second.exists());
}

#[test]
fn unwritable_output_dir_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let renderer = SvgChartRenderer::new(blocker.join("charts"));
    let err = renderer.histogram(&table(), "Marketing").unwrap_err();
    assert!(err.to_string().contains("chart io error"));
}
