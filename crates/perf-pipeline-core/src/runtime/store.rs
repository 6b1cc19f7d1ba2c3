// crates/perf-pipeline-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Recording Store
// Description: Simple in-memory performance store for tests and dry runs.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`RecordingStore`] mimics a relational table with an identity column and
//! records every submitted batch so callers can assert exactly what would
//! have reached a database. Failures can be injected per operation. It is
//! not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::ParameterTuple;
use crate::core::TableName;
use crate::interfaces::PerformanceStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// [`PerformanceStore::drop_table`].
    DropTable,
    /// [`PerformanceStore::create_table`].
    CreateTable,
    /// [`PerformanceStore::insert_batch`].
    InsertBatch,
}

impl StoreOperation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DropTable => "drop_table",
            Self::CreateTable => "create_table",
            Self::InsertBatch => "insert_batch",
        }
    }
}

/// One stored row with its assigned identity.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    /// Identity assigned by the store.
    pub id: i64,
    /// Parameters as submitted.
    pub parameters: ParameterTuple,
}

/// In-memory table contents and identity counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    /// Committed rows in insert order.
    pub rows: Vec<StoredRow>,
    /// Next identity value.
    next_id: i64,
}

/// In-memory performance store that records every call.
#[derive(Debug, Default)]
pub struct RecordingStore {
    /// Tables keyed by name.
    tables: BTreeMap<String, MemoryTable>,
    /// Batches submitted, in call order, whether or not they committed.
    batches: Vec<Vec<ParameterTuple>>,
    /// Operation to fail, if any.
    fail_on: Option<StoreOperation>,
    /// Number of times `close` released the connection.
    close_count: usize,
    /// Whether the connection was released.
    closed: bool,
}

impl RecordingStore {
    /// Creates an empty, open store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that fails the given operation with a query error.
    #[must_use]
    pub fn failing_on(operation: StoreOperation) -> Self {
        Self {
            fail_on: Some(operation),
            ..Self::default()
        }
    }

    /// Returns the current contents of a table.
    #[must_use]
    pub fn table(&self, name: &TableName) -> Option<&MemoryTable> {
        self.tables.get(name.as_str())
    }

    /// Returns every submitted batch.
    #[must_use]
    pub fn batches(&self) -> &[Vec<ParameterTuple>] {
        &self.batches
    }

    /// Returns how many times the connection was actually released.
    #[must_use]
    pub const fn close_count(&self) -> usize {
        self.close_count
    }

    /// Fails with [`StoreError::Closed`] once released.
    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed { Err(StoreError::Closed) } else { Ok(()) }
    }

    /// Fails when `operation` was configured to fail.
    fn check_injected(&self, operation: StoreOperation) -> Result<(), StoreError> {
        if self.fail_on == Some(operation) {
            return Err(StoreError::Query(format!("injected failure for {}", operation.as_str())));
        }
        Ok(())
    }
}

impl PerformanceStore for RecordingStore {
    fn drop_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.check_injected(StoreOperation::DropTable)?;
        self.tables.remove(table.as_str());
        Ok(())
    }

    fn create_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.check_injected(StoreOperation::CreateTable)?;
        if self.tables.contains_key(table.as_str()) {
            return Err(StoreError::Query(format!("table {table} already exists")));
        }
        self.tables.insert(
            table.as_str().to_string(),
            MemoryTable {
                rows: Vec::new(),
                next_id: 1,
            },
        );
        Ok(())
    }

    fn insert_batch(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, StoreError> {
        self.ensure_open()?;
        self.batches.push(rows.to_vec());
        self.check_injected(StoreOperation::InsertBatch)?;
        let target = self
            .tables
            .get_mut(table.as_str())
            .ok_or_else(|| StoreError::Query(format!("no such table: {table}")))?;
        let mut staged = target.clone();
        for parameters in rows {
            let id = match parameters.id {
                Some(id) => id,
                None => staged.next_id,
            };
            if staged.rows.iter().any(|row| row.id == id) {
                return Err(StoreError::Query(format!("duplicate primary key {id}")));
            }
            staged.next_id = staged.next_id.max(id.saturating_add(1));
            staged.rows.push(StoredRow {
                id,
                parameters: parameters.clone(),
            });
        }
        *target = staged;
        Ok(rows.len())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if !self.closed {
            self.closed = true;
            self.close_count += 1;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
