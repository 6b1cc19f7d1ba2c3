// crates/perf-pipeline-config/src/lib.rs
// ============================================================================
// Module: Pipeline Config Library
// Description: Configuration model and validation for perf-pipeline.toml.
// Purpose: Single source of truth for pipeline configuration semantics.
// Dependencies: perf-pipeline-core, perf-pipeline-store-*, serde, toml
// ============================================================================

//! ## Overview
//! `perf-pipeline-config` loads `perf-pipeline.toml`, applies defaults and
//! environment overrides, and validates every section before the pipeline
//! touches the input file or the database.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
