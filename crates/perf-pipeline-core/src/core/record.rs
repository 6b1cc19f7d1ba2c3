// crates/perf-pipeline-core/src/core/record.rs
// ============================================================================
// Module: Employee Records
// Description: Employee performance record and its store parameter tuple.
// Purpose: Define the row shape read from JSON and written to the store.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`EmployeeRecord`] is one employee performance observation. Input rows
//! carry exactly five keys; the surrogate `id` is assigned by the store on
//! insert and is never read from the input file.
//!
//! Accepted key spellings are fixed: `employee_id` (alias `employee__id`),
//! `department`, `performance_score`, `years_with_company` (alias
//! `year_with_company`), and `salary`. Unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Employee Record
// ============================================================================

/// One employee performance observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeRecord {
    /// Surrogate key assigned by the store; `None` until inserted.
    #[serde(skip)]
    pub id: Option<i64>,
    /// Employee identifier from the source system.
    #[serde(alias = "employee__id")]
    pub employee_id: i64,
    /// Department name.
    pub department: String,
    /// Performance score.
    pub performance_score: f64,
    /// Whole years the employee has been with the company.
    #[serde(alias = "year_with_company")]
    pub years_with_company: i64,
    /// Salary.
    pub salary: f64,
}

impl EmployeeRecord {
    /// Returns the value of a numeric field as `f64`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Integer fields are small counts and identifiers plotted as floats."
    )]
    pub const fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::EmployeeId => self.employee_id as f64,
            NumericField::PerformanceScore => self.performance_score,
            NumericField::YearsWithCompany => self.years_with_company as f64,
            NumericField::Salary => self.salary,
        }
    }

    /// Builds the positional insert parameters for this record.
    #[must_use]
    pub fn to_parameters(&self) -> ParameterTuple {
        ParameterTuple {
            id: self.id,
            employee_id: self.employee_id,
            department: self.department.clone(),
            performance_score: self.performance_score,
            years_with_company: self.years_with_company,
            salary: self.salary,
        }
    }
}

// ============================================================================
// SECTION: Numeric Fields
// ============================================================================

/// Numeric record columns usable as statistics inputs or chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// `employee_id` column.
    EmployeeId,
    /// `performance_score` column.
    PerformanceScore,
    /// `years_with_company` column.
    YearsWithCompany,
    /// `salary` column.
    Salary,
}

impl NumericField {
    /// Returns the column name used in JSON and SQL.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::EmployeeId => "employee_id",
            Self::PerformanceScore => "performance_score",
            Self::YearsWithCompany => "years_with_company",
            Self::Salary => "salary",
        }
    }
}

// ============================================================================
// SECTION: Parameter Tuple
// ============================================================================

/// Positional insert parameters in column order
/// `(id, employee_id, department, performance_score, years_with_company, salary)`.
///
/// # Invariants
/// - `id` is `None` for fresh rows so the store assigns the identity value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterTuple {
    /// Identity value, or `None` to let the store assign it.
    pub id: Option<i64>,
    /// Employee identifier.
    pub employee_id: i64,
    /// Department name.
    pub department: String,
    /// Performance score.
    pub performance_score: f64,
    /// Years with the company.
    pub years_with_company: i64,
    /// Salary.
    pub salary: f64,
}

impl ParameterTuple {
    /// Column names in parameter order.
    pub const COLUMNS: [&'static str; 6] =
        ["id", "employee_id", "department", "performance_score", "years_with_company", "salary"];
}
