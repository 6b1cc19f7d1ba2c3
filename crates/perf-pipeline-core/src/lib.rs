// crates/perf-pipeline-core/src/lib.rs
// ============================================================================
// Module: Performance Pipeline Core Library
// Description: Public API surface for the employee performance pipeline.
// Purpose: Expose record types, store interfaces, and runtime stages.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The pipeline core loads employee performance records from JSON, hands them
//! to a relational store through the [`PerformanceStore`] interface, and
//! derives descriptive statistics and histogram bins from the in-memory
//! table. It is backend-agnostic: `SQLite` and Postgres stores live in their
//! own crates, and chart rendering consumes the derived bins and series.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::ChartArtifact;
pub use interfaces::ChartSink;
pub use interfaces::ChartSinkError;
pub use interfaces::PerformanceStore;
pub use interfaces::PipelineEvent;
pub use interfaces::PipelineObserver;
pub use interfaces::StoreError;
pub use runtime::DEFAULT_BIN_COUNT;
pub use runtime::DEFAULT_HISTOGRAM_DEPARTMENT;
pub use runtime::HistogramBin;
pub use runtime::HistogramBins;
pub use runtime::LoadError;
pub use runtime::MAX_INPUT_BYTES;
pub use runtime::Pipeline;
pub use runtime::PipelineError;
pub use runtime::PipelineOptions;
pub use runtime::PipelineSummary;
pub use runtime::RecordingStore;
pub use runtime::SCATTER_PLOTS;
pub use runtime::StatisticsReport;
pub use runtime::StoreOperation;
pub use runtime::SummaryStatistics;
pub use runtime::insert_records;
pub use runtime::load_table;
pub use runtime::load_table_from_str;
pub use runtime::load_table_with_limit;
pub use runtime::mean;
pub use runtime::median;
pub use runtime::parameter_tuples;
pub use runtime::pearson_correlation;
pub use runtime::sample_std_dev;
