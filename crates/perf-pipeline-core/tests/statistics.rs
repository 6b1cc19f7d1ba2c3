// crates/perf-pipeline-core/tests/statistics.rs
// ============================================================================
// Module: Statistics Reporter Tests
// Description: Validate descriptive statistics and correlation semantics.
// Purpose: Pin sample deviation, NaN handling, and group ordering.
// Dependencies: perf-pipeline-core, proptest
// ============================================================================

//! ## Overview
//! Example-based checks for the statistics report plus property tests for
//! the series helpers.

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

use perf_pipeline_core::EmployeeRecord;
use perf_pipeline_core::PerformanceTable;
use perf_pipeline_core::StatisticsReport;
use perf_pipeline_core::mean;
use perf_pipeline_core::median;
use perf_pipeline_core::pearson_correlation;
use perf_pipeline_core::sample_std_dev;
use proptest::prelude::*;

// ============================================================================
// SECTION: Helpers
// ============================================================================

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

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn two_row_report_matches_expected_values() {
    let table = PerformanceTable::new(vec![
        record("Marketing", 85.5, 3, 55_000.0),
        record("Sales", 70.0, 5, 48_000.0),
    ]);
    let report = StatisticsReport::compute(&table);
    assert_eq!(report.row_count, 2);
    assert_close(report.performance.mean, 77.75);
    assert_close(report.performance.median, 77.75);
    assert_close(report.performance.std_dev, 15.5 / 2.0_f64.sqrt());
    assert_close(report.salary.mean, 51_500.0);
    assert_eq!(
        report.department_counts,
        vec![("Marketing".to_string(), 1), ("Sales".to_string(), 1)]
    );
    assert_close(report.years_performance_correlation, -1.0);
    assert_close(report.salary_performance_correlation, 1.0);
}

#[test]
fn identical_scores_have_zero_deviation_and_nan_correlation() {
    let table = PerformanceTable::new(vec![
        record("Sales", 80.0, 1, 10.0),
        record("Sales", 80.0, 4, 20.0),
    ]);
    let report = StatisticsReport::compute(&table);
    assert_eq!(report.performance.std_dev, 0.0);
    assert!(report.years_performance_correlation.is_nan());
    assert!(report.salary_performance_correlation.is_nan());
}

#[test]
fn perfectly_linear_salary_correlates_at_one() {
    let table = PerformanceTable::new(vec![
        record("A", 1.0, 1, 10.0),
        record("A", 2.0, 1, 20.0),
        record("A", 3.0, 1, 30.0),
    ]);
    let report = StatisticsReport::compute(&table);
    assert_close(report.salary_performance_correlation, 1.0);
}

#[test]
fn empty_table_reports_nan_everywhere() {
    let report = StatisticsReport::compute(&PerformanceTable::default());
    assert_eq!(report.row_count, 0);
    for value in [
        report.performance.mean,
        report.performance.median,
        report.performance.std_dev,
        report.salary.mean,
        report.salary.median,
        report.salary.std_dev,
        report.years_performance_correlation,
        report.salary_performance_correlation,
    ] {
        assert!(value.is_nan());
    }
    assert!(report.department_counts.is_empty());
}

#[test]
fn department_counts_are_lexicographic() {
    let table = PerformanceTable::new(vec![
        record("Sales", 1.0, 1, 1.0),
        record("Engineering", 2.0, 2, 2.0),
        record("Sales", 3.0, 3, 3.0),
        record("Marketing", 4.0, 4, 4.0),
    ]);
    let report = StatisticsReport::compute(&table);
    assert_eq!(
        report.department_counts,
        vec![
            ("Engineering".to_string(), 1),
            ("Marketing".to_string(), 1),
            ("Sales".to_string(), 2),
        ]
    );
}

#[test]
fn median_handles_odd_and_even_lengths() {
    assert_close(median(&[3.0, 1.0, 2.0]), 2.0);
    assert_close(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
}

#[test]
fn single_value_has_nan_deviation() {
    assert!(sample_std_dev(&[5.0]).is_nan());
    assert_close(mean(&[5.0]), 5.0);
}

#[test]
fn nan_report_serializes_as_null() {
    let report = StatisticsReport::compute(&PerformanceTable::default());
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["performance"]["mean"].is_null());
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn correlation_stays_within_unit_interval(
        pairs in prop::collection::vec((-1.0e6_f64 .. 1.0e6, -1.0e6_f64 .. 1.0e6), 2 .. 64)
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let r = pearson_correlation(&x, &y);
        prop_assert!(r.is_nan() || (-1.0 ..= 1.0).contains(&r));
    }

    #[test]
    fn correlation_is_symmetric(
        pairs in prop::collection::vec((-1.0e3_f64 .. 1.0e3, -1.0e3_f64 .. 1.0e3), 2 .. 32)
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let forward = pearson_correlation(&x, &y);
        let backward = pearson_correlation(&y, &x);
        prop_assert!(
            (forward.is_nan() && backward.is_nan()) || (forward - backward).abs() < 1e-9
        );
    }

    #[test]
    fn median_lies_between_min_and_max(
        values in prop::collection::vec(-1.0e6_f64 .. 1.0e6, 1 .. 64)
    ) {
        let m = median(&values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(m >= min && m <= max);
    }

    #[test]
    fn shifting_a_series_keeps_its_deviation(
        values in prop::collection::vec(-1.0e3_f64 .. 1.0e3, 2 .. 32),
        shift in -1.0e3_f64 .. 1.0e3
    ) {
        let shifted: Vec<f64> = values.iter().map(|value| value + shift).collect();
        prop_assert!((sample_std_dev(&values) - sample_std_dev(&shifted)).abs() < 1e-6);
    }
}
