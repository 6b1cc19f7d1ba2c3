// crates/perf-pipeline-core/src/runtime/mod.rs
// ============================================================================
// Module: Pipeline Runtime
// Description: Loader, inserter, statistics, binning, and the pipeline runner.
// Purpose: Implement each pipeline stage over the core types.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime stages are plain functions over [`crate::core::PerformanceTable`]
//! plus the [`Pipeline`] runner that sequences them. The in-memory
//! [`RecordingStore`] backs tests and dry runs.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod histogram;
pub mod inserter;
pub mod loader;
pub mod pipeline;
pub mod statistics;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use histogram::DEFAULT_BIN_COUNT;
pub use histogram::HistogramBin;
pub use histogram::HistogramBins;
pub use inserter::insert_records;
pub use inserter::parameter_tuples;
pub use loader::LoadError;
pub use loader::MAX_INPUT_BYTES;
pub use loader::load_table;
pub use loader::load_table_from_str;
pub use loader::load_table_with_limit;
pub use pipeline::DEFAULT_HISTOGRAM_DEPARTMENT;
pub use pipeline::Pipeline;
pub use pipeline::PipelineError;
pub use pipeline::PipelineOptions;
pub use pipeline::PipelineSummary;
pub use pipeline::SCATTER_PLOTS;
pub use statistics::StatisticsReport;
pub use statistics::SummaryStatistics;
pub use statistics::mean;
pub use statistics::median;
pub use statistics::pearson_correlation;
pub use statistics::sample_std_dev;
pub use store::MemoryTable;
pub use store::RecordingStore;
pub use store::StoreOperation;
pub use store::StoredRow;
