// crates/perf-pipeline-core/src/core/table.rs
// ============================================================================
// Module: Performance Table
// Description: Immutable in-memory table of employee performance records.
// Purpose: Provide ordered read-only access, column projections, and groups.
// Dependencies: crate::core::record
// ============================================================================

//! ## Overview
//! A [`PerformanceTable`] is built once by the loader and never mutated. The
//! insert, statistics, and chart stages all borrow it immutably. Department
//! groups are derived views recomputed on demand and ordered
//! lexicographically by department name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::record::EmployeeRecord;
use crate::core::record::NumericField;

// ============================================================================
// SECTION: Table
// ============================================================================

/// Ordered, immutable sequence of employee records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceTable {
    /// Records in source order.
    records: Vec<EmployeeRecord>,
}

impl PerformanceTable {
    /// Wraps records in source order.
    #[must_use]
    pub const fn new(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records,
        }
    }

    /// Returns the records in source order.
    #[must_use]
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the table holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Projects a numeric column in source order.
    #[must_use]
    pub fn column(&self, field: NumericField) -> Vec<f64> {
        self.records.iter().map(|record| record.numeric(field)).collect()
    }

    /// Returns the records whose department equals `department`.
    pub fn in_department<'a>(
        &'a self,
        department: &'a str,
    ) -> impl Iterator<Item = &'a EmployeeRecord> + 'a {
        self.records.iter().filter(move |record| record.department == department)
    }

    /// Partitions records by department, ordered by department name.
    #[must_use]
    pub fn department_groups(&self) -> Vec<DepartmentGroup<'_>> {
        let mut groups: BTreeMap<&str, Vec<&EmployeeRecord>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(record.department.as_str()).or_default().push(record);
        }
        groups
            .into_iter()
            .map(|(department, records)| DepartmentGroup {
                department,
                records,
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Department Group
// ============================================================================

/// Records sharing one department, borrowed from a [`PerformanceTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentGroup<'a> {
    /// Department name.
    pub department: &'a str,
    /// Member records in source order.
    pub records: Vec<&'a EmployeeRecord>,
}

impl DepartmentGroup<'_> {
    /// Returns the number of records in the group.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.records.len()
    }
}
