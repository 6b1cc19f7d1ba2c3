// crates/perf-pipeline-core/src/core/mod.rs
// ============================================================================
// Module: Performance Pipeline Core Types
// Description: Employee records, the in-memory table, and store identifiers.
// Purpose: Provide stable, serializable types shared by every pipeline stage.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the employee record as read from JSON, the immutable
//! [`PerformanceTable`] built from those records, and the positional
//! [`ParameterTuple`] handed to relational stores.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod record;
pub mod table;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::DEFAULT_TABLE_NAME;
pub use identifiers::MAX_TABLE_NAME_LENGTH;
pub use identifiers::TableName;
pub use identifiers::TableNameError;
pub use record::EmployeeRecord;
pub use record::NumericField;
pub use record::ParameterTuple;
pub use table::DepartmentGroup;
pub use table::PerformanceTable;
