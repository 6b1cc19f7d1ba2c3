// crates/perf-pipeline-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Performance Store
// Description: PerformanceStore backend using SQLite.
// Purpose: Provide a file-backed relational store for pipeline runs.
// Dependencies: perf-pipeline-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`PerformanceStore`] implementation
//! that drops and recreates the employee performance table and writes each
//! run's records in a single transaction.
//!
//! [`PerformanceStore`]: perf_pipeline_core::PerformanceStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqlitePerformanceStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
