// crates/perf-pipeline-store-postgres/src/lib.rs
// ============================================================================
// Module: Postgres Performance Store
// Description: Postgres-backed PerformanceStore implementation.
// Purpose: Load employee performance rows into a networked relational store.
// Dependencies: perf-pipeline-core, postgres, serde, thiserror
// ============================================================================

//! ## Overview
//! Server-backed counterpart to the `SQLite` store. Connections use the
//! synchronous `postgres` client without TLS and are never pooled: one run
//! owns one connection.

pub mod store;

pub use store::PostgresPerformanceStore;
pub use store::PostgresStoreConfig;
pub use store::PostgresStoreError;
pub use store::create_table_sql;
pub use store::drop_table_sql;
pub use store::insert_sql;
