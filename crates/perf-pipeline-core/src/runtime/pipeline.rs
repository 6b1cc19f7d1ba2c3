// crates/perf-pipeline-core/src/runtime/pipeline.rs
// ============================================================================
// Module: Pipeline Runner
// Description: Sequences load, schema setup, insert, statistics, and charts.
// Purpose: Run every side-effecting step in order and release the store.
// Dependencies: thiserror, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! [`Pipeline::run`] executes one full run:
//! 1. load the input file (before any store contact),
//! 2. connect, drop and recreate the target table,
//! 3. insert every record as one batch and release the connection,
//! 4. compute statistics over the in-memory table,
//! 5. render the department histogram and two scatter plots.
//!
//! Any failure stops the run. The store connection is closed on every path
//! that opened it, including failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use thiserror::Error;

use crate::core::NumericField;
use crate::core::PerformanceTable;
use crate::core::TableName;
use crate::interfaces::ChartArtifact;
use crate::interfaces::ChartSink;
use crate::interfaces::ChartSinkError;
use crate::interfaces::PerformanceStore;
use crate::interfaces::PipelineEvent;
use crate::interfaces::PipelineObserver;
use crate::interfaces::StoreError;
use crate::runtime::inserter::insert_records;
use crate::runtime::loader::LoadError;
use crate::runtime::loader::MAX_INPUT_BYTES;
use crate::runtime::loader::load_table_with_limit;
use crate::runtime::statistics::StatisticsReport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Department used for the histogram when none is configured.
pub const DEFAULT_HISTOGRAM_DEPARTMENT: &str = "Marketing";

/// Scatter plots rendered after the histogram, as `(x, y)` fields.
pub const SCATTER_PLOTS: [(NumericField, NumericField); 2] = [
    (NumericField::YearsWithCompany, NumericField::PerformanceScore),
    (NumericField::Salary, NumericField::PerformanceScore),
];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Store connection or statement failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Chart rendering failure.
    #[error(transparent)]
    Chart(#[from] ChartSinkError),
    /// Progress output failure.
    #[error("failed to write pipeline output: {0}")]
    Output(String),
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Target table name.
    pub table_name: TableName,
    /// Department whose performance histogram is rendered.
    pub histogram_department: String,
    /// Maximum input file size in bytes.
    pub input_max_bytes: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            table_name: TableName::default(),
            histogram_department: DEFAULT_HISTOGRAM_DEPARTMENT.to_string(),
            input_max_bytes: MAX_INPUT_BYTES,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    /// Records loaded from the input file.
    pub rows_loaded: usize,
    /// Rows committed to the store.
    pub rows_inserted: usize,
    /// Statistics over the loaded table.
    pub statistics: StatisticsReport,
    /// Charts produced, in render order.
    pub charts: Vec<ChartArtifact>,
}

/// Pipeline runner.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    /// Run options.
    options: PipelineOptions,
}

impl Pipeline {
    /// Creates a runner with the given options.
    #[must_use]
    pub const fn new(options: PipelineOptions) -> Self {
        Self {
            options,
        }
    }

    /// Returns the run options.
    #[must_use]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Executes a full run.
    ///
    /// `connect` is only invoked after the input loaded successfully. Pass
    /// `None` for `charts` to skip chart rendering.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] on the first failing step.
    pub fn run<S, F, O>(
        &self,
        input: &Path,
        connect: F,
        charts: Option<&mut dyn ChartSink>,
        observer: &mut O,
    ) -> Result<PipelineSummary, PipelineError>
    where
        S: PerformanceStore,
        F: FnOnce() -> Result<S, StoreError>,
        O: PipelineObserver + ?Sized,
    {
        let table = load_table_with_limit(input, self.options.input_max_bytes)?;
        notify(
            observer,
            PipelineEvent::DataLoaded {
                rows: table.len(),
            },
        )?;
        let mut store = connect()?;
        let persisted = notify(observer, PipelineEvent::Connected)
            .and_then(|()| self.persist(&table, &mut store, observer));
        let closed = store.close();
        let rows_inserted = persisted?;
        closed?;
        let (statistics, charts) = self.analyze(&table, charts, observer)?;
        Ok(PipelineSummary {
            rows_loaded: table.len(),
            rows_inserted,
            statistics,
            charts,
        })
    }

    /// Drops and recreates the target table, then inserts every record.
    ///
    /// The caller keeps ownership of the store and must close it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when a statement or observer fails.
    pub fn persist<S, O>(
        &self,
        table: &PerformanceTable,
        store: &mut S,
        observer: &mut O,
    ) -> Result<usize, PipelineError>
    where
        S: PerformanceStore + ?Sized,
        O: PipelineObserver + ?Sized,
    {
        let table_name = &self.options.table_name;
        store.drop_table(table_name)?;
        notify(
            observer,
            PipelineEvent::TableDropped {
                table: table_name,
            },
        )?;
        store.create_table(table_name)?;
        notify(
            observer,
            PipelineEvent::TableCreated {
                table: table_name,
            },
        )?;
        let rows = insert_records(table, store, table_name)?;
        notify(
            observer,
            PipelineEvent::DataInserted {
                rows,
            },
        )?;
        Ok(rows)
    }

    /// Computes statistics and renders charts from the in-memory table.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when a chart or observer fails.
    pub fn analyze<O>(
        &self,
        table: &PerformanceTable,
        charts: Option<&mut dyn ChartSink>,
        observer: &mut O,
    ) -> Result<(StatisticsReport, Vec<ChartArtifact>), PipelineError>
    where
        O: PipelineObserver + ?Sized,
    {
        let statistics = StatisticsReport::compute(table);
        notify(observer, PipelineEvent::Statistics(&statistics))?;
        let mut artifacts = Vec::new();
        if let Some(sink) = charts {
            let histogram = sink.histogram(table, &self.options.histogram_department)?;
            notify(observer, PipelineEvent::ChartWritten(&histogram))?;
            artifacts.push(histogram);
            for (x, y) in SCATTER_PLOTS {
                let scatter = sink.scatter(table, x, y)?;
                notify(observer, PipelineEvent::ChartWritten(&scatter))?;
                artifacts.push(scatter);
            }
        }
        Ok((statistics, artifacts))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Forwards an event to the observer.
fn notify<O: PipelineObserver + ?Sized>(
    observer: &mut O,
    event: PipelineEvent<'_>,
) -> Result<(), PipelineError> {
    observer.on_event(event).map_err(PipelineError::Output)
}
