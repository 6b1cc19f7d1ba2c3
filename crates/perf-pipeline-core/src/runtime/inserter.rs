// crates/perf-pipeline-core/src/runtime/inserter.rs
// ============================================================================
// Module: Bulk Inserter
// Description: Converts table rows to parameter tuples and writes one batch.
// Purpose: Submit every record to the store in a single transaction.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Records are converted to positional [`ParameterTuple`]s in table order and
//! handed to [`PerformanceStore::insert_batch`] as one batch. Stores commit
//! the batch atomically, so a failure leaves no rows behind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ParameterTuple;
use crate::core::PerformanceTable;
use crate::core::TableName;
use crate::interfaces::PerformanceStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Insert
// ============================================================================

/// Builds insert parameters for every record, in table order.
#[must_use]
pub fn parameter_tuples(table: &PerformanceTable) -> Vec<ParameterTuple> {
    table.records().iter().map(|record| record.to_parameters()).collect()
}

/// Inserts every record of `table` into `table_name` as one batch.
///
/// # Errors
///
/// Returns [`StoreError`] when the batch fails or the store reports a row
/// count different from the table length.
pub fn insert_records<S: PerformanceStore + ?Sized>(
    table: &PerformanceTable,
    store: &mut S,
    table_name: &TableName,
) -> Result<usize, StoreError> {
    let rows = parameter_tuples(table);
    let inserted = store.insert_batch(table_name, &rows)?;
    if inserted != rows.len() {
        return Err(StoreError::Query(format!(
            "batch insert wrote {inserted} rows, expected {}",
            rows.len()
        )));
    }
    Ok(inserted)
}
