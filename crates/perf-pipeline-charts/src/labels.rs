// crates/perf-pipeline-charts/src/labels.rs
// ============================================================================
// Module: Chart Labels
// Description: Titles and axis labels for rendered charts.
// Purpose: Let callers supply localized chart text.
// Dependencies: perf-pipeline-core
// ============================================================================

//! ## Overview
//! Labels are plain strings supplied by the caller. The histogram title is a
//! template where `{department}` is replaced with the department name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use perf_pipeline_core::NumericField;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Placeholder substituted in [`ChartLabels::histogram_title`].
const DEPARTMENT_PLACEHOLDER: &str = "{department}";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Title and axis labels for one scatter plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterLabels {
    /// Chart caption.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
}

/// Text used across all charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    /// Histogram caption template containing `{department}`.
    pub histogram_title: String,
    /// Performance axis label.
    pub performance: String,
    /// Frequency axis label.
    pub frequency: String,
    /// Years-with-company axis label.
    pub years_with_company: String,
    /// Salary axis label.
    pub salary: String,
    /// Years vs. performance scatter caption.
    pub years_vs_performance: String,
    /// Salary vs. performance scatter caption.
    pub salary_vs_performance: String,
}

// ============================================================================
// SECTION: Label Lookup
// ============================================================================

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            histogram_title: "Performance histogram for the {department} department".to_string(),
            performance: "Performance".to_string(),
            frequency: "Frequency".to_string(),
            years_with_company: "Years with company".to_string(),
            salary: "Salary".to_string(),
            years_vs_performance: "Years with company vs. Performance".to_string(),
            salary_vs_performance: "Salary vs. Performance".to_string(),
        }
    }
}

impl ChartLabels {
    /// Returns the histogram caption for `department`.
    #[must_use]
    pub fn histogram_caption(&self, department: &str) -> String {
        self.histogram_title.replace(DEPARTMENT_PLACEHOLDER, department)
    }

    /// Returns the axis label for `field`.
    #[must_use]
    pub fn axis(&self, field: NumericField) -> String {
        match field {
            NumericField::PerformanceScore => self.performance.clone(),
            NumericField::YearsWithCompany => self.years_with_company.clone(),
            NumericField::Salary => self.salary.clone(),
            NumericField::EmployeeId => field.column_name().to_string(),
        }
    }

    /// Returns title and axis labels for an `x` vs. `y` scatter plot.
    #[must_use]
    pub fn scatter(&self, x: NumericField, y: NumericField) -> ScatterLabels {
        let title = match (x, y) {
            (NumericField::YearsWithCompany, NumericField::PerformanceScore) => {
                self.years_vs_performance.clone()
            }
            (NumericField::Salary, NumericField::PerformanceScore) => {
                self.salary_vs_performance.clone()
            }
            _ => format!("{} vs. {}", self.axis(x), self.axis(y)),
        };
        ScatterLabels {
            title,
            x_label: self.axis(x),
            y_label: self.axis(y),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
