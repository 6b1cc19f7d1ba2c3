// crates/perf-pipeline-core/src/runtime/statistics.rs
// ============================================================================
// Module: Statistics Reporter
// Description: Descriptive statistics over the in-memory performance table.
// Purpose: Compute mean, median, sample deviation, group counts, correlation.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! Statistics are computed over the whole in-memory table and never re-read
//! from the store. Undefined values are reported as `NaN`:
//! - every statistic of an empty series,
//! - sample standard deviation of fewer than two values,
//! - Pearson correlation when either series has zero variance or fewer than
//!   two points.
//!
//! `NaN` serializes as JSON `null`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::NumericField;
use crate::core::PerformanceTable;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Mean, median, and sample standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (mean of the two middle values for even counts).
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
}

impl SummaryStatistics {
    /// Summarizes a series.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            median: median(values),
            std_dev: sample_std_dev(values),
        }
    }
}

/// Full statistics report in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    /// Number of records summarized.
    pub row_count: usize,
    /// `performance_score` summary.
    pub performance: SummaryStatistics,
    /// `salary` summary.
    pub salary: SummaryStatistics,
    /// Record counts per department, ordered by department name.
    pub department_counts: Vec<(String, usize)>,
    /// Pearson correlation of `years_with_company` and `performance_score`.
    pub years_performance_correlation: f64,
    /// Pearson correlation of `salary` and `performance_score`.
    pub salary_performance_correlation: f64,
}

impl StatisticsReport {
    /// Computes the report for a table.
    #[must_use]
    pub fn compute(table: &PerformanceTable) -> Self {
        let performance = table.column(NumericField::PerformanceScore);
        let salary = table.column(NumericField::Salary);
        let years = table.column(NumericField::YearsWithCompany);
        let department_counts = table
            .department_groups()
            .into_iter()
            .map(|group| (group.department.to_string(), group.count()))
            .collect();
        Self {
            row_count: table.len(),
            performance: SummaryStatistics::of(&performance),
            salary: SummaryStatistics::of(&salary),
            department_counts,
            years_performance_correlation: pearson_correlation(&years, &performance),
            salary_performance_correlation: pearson_correlation(&salary, &performance),
        }
    }
}

// ============================================================================
// SECTION: Series Statistics
// ============================================================================

/// Returns the series length as `f64`.
#[allow(clippy::cast_precision_loss, reason = "Row counts stay far below 2^52.")]
const fn count_f64(values: &[f64]) -> f64 {
    values.len() as f64
}

/// Arithmetic mean; `NaN` for an empty series.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / count_f64(values)
}

/// Median; `NaN` for an empty series.
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation; `NaN` for fewer than two values.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let center = mean(values);
    let sum_sq: f64 = values.iter().map(|value| (value - center).powi(2)).sum();
    (sum_sq / (count_f64(values) - 1.0)).sqrt()
}

/// Pearson product-moment correlation of two equal-length series.
///
/// Returns `NaN` when the lengths differ, fewer than two pairs exist, or
/// either series has zero variance.
#[must_use]
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    let mean_x = mean(x);
    let mean_y = mean(y);
    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}
