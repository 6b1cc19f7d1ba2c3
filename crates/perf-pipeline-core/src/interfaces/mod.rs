// crates/perf-pipeline-core/src/interfaces/mod.rs
// ============================================================================
// Module: Pipeline Interfaces
// Description: Backend-agnostic interfaces for storage, charts, and progress.
// Purpose: Define the contract surfaces used by the pipeline runner.
// Dependencies: crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! Interfaces define how the pipeline reaches a relational store, a chart
//! renderer, and a progress observer without embedding backend details.
//! Every failure is reported as a typed error; nothing is retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::core::NumericField;
use crate::core::ParameterTuple;
use crate::core::PerformanceTable;
use crate::core::TableName;
use crate::runtime::StatisticsReport;

// ============================================================================
// SECTION: Performance Store
// ============================================================================

/// Relational store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused authentication.
    #[error("database connection error: {0}")]
    Connection(String),
    /// A DDL or DML statement failed.
    #[error("database query error: {0}")]
    Query(String),
    /// The connection was already released.
    #[error("database connection already closed")]
    Closed,
}

/// Schema management and batched insert over one owned connection.
///
/// Implementations are constructed already connected; the connect step is
/// backend-specific and fails with [`StoreError::Connection`].
///
/// # Invariants
/// - `close` releases the connection at most once; later calls are no-ops.
/// - After `close`, every other operation fails with [`StoreError::Closed`].
pub trait PerformanceStore {
    /// Drops the table if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the statement fails.
    fn drop_table(&mut self, table: &TableName) -> Result<(), StoreError>;

    /// Creates the employee performance table with the fixed schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the statement fails.
    fn create_table(&mut self, table: &TableName) -> Result<(), StoreError>;

    /// Inserts all rows as one batch inside a single transaction.
    ///
    /// Either every row is committed or none is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when any row fails; the batch is rolled back.
    fn insert_batch(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, StoreError>;

    /// Releases the connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend reports a close failure.
    fn close(&mut self) -> Result<(), StoreError>;

    /// Returns true once the connection has been released.
    fn is_closed(&self) -> bool;
}

impl<T: PerformanceStore + ?Sized> PerformanceStore for &mut T {
    fn drop_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        (**self).drop_table(table)
    }

    fn create_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        (**self).create_table(table)
    }

    fn insert_batch(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, StoreError> {
        (**self).insert_batch(table, rows)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<T: PerformanceStore + ?Sized> PerformanceStore for Box<T> {
    fn drop_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        (**self).drop_table(table)
    }

    fn create_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        (**self).create_table(table)
    }

    fn insert_batch(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, StoreError> {
        (**self).insert_batch(table, rows)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

// ============================================================================
// SECTION: Chart Sink
// ============================================================================

/// A chart produced by a [`ChartSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    /// Location the chart was written to.
    pub path: PathBuf,
}

/// Chart rendering errors surfaced to the pipeline.
#[derive(Debug, Error)]
#[error("chart rendering failed: {0}")]
pub struct ChartSinkError(pub String);

/// Presentation-only chart renderer consumed by the pipeline.
pub trait ChartSink {
    /// Renders a performance histogram for one department.
    ///
    /// # Errors
    ///
    /// Returns [`ChartSinkError`] when the chart cannot be produced.
    fn histogram(
        &mut self,
        table: &PerformanceTable,
        department: &str,
    ) -> Result<ChartArtifact, ChartSinkError>;

    /// Renders a scatter plot of two numeric fields.
    ///
    /// # Errors
    ///
    /// Returns [`ChartSinkError`] when the chart cannot be produced.
    fn scatter(
        &mut self,
        table: &PerformanceTable,
        x: NumericField,
        y: NumericField,
    ) -> Result<ChartArtifact, ChartSinkError>;
}

// ============================================================================
// SECTION: Pipeline Observer
// ============================================================================

/// Progress events emitted in pipeline order.
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    /// Input file parsed.
    DataLoaded {
        /// Number of records loaded.
        rows: usize,
    },
    /// Store connection established.
    Connected,
    /// Target table dropped (if it existed).
    TableDropped {
        /// Table name.
        table: &'a TableName,
    },
    /// Target table created.
    TableCreated {
        /// Table name.
        table: &'a TableName,
    },
    /// Batch insert committed.
    DataInserted {
        /// Number of rows inserted.
        rows: usize,
    },
    /// Statistics computed over the in-memory table.
    Statistics(&'a StatisticsReport),
    /// A chart was produced.
    ChartWritten(&'a ChartArtifact),
}

/// Receives pipeline progress events.
pub trait PipelineObserver {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns a message when the observer cannot record the event (for
    /// example when console output fails).
    fn on_event(&mut self, event: PipelineEvent<'_>) -> Result<(), String>;
}

/// Observer that discards every event.
impl PipelineObserver for () {
    fn on_event(&mut self, _event: PipelineEvent<'_>) -> Result<(), String> {
        Ok(())
    }
}
