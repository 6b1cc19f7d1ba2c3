// crates/perf-pipeline-cli/src/lib.rs
// ============================================================================
// Module: Pipeline CLI Library
// Description: Shared helpers for the perf-pipeline command-line interface.
// Purpose: Provide reusable components (i18n, console output) for the binary.
// Dependencies: perf-pipeline-charts, perf-pipeline-core
// ============================================================================

//! ## Overview
//! This library houses the message catalog and the console progress observer.
//! The binary entry point (`src/main.rs`) imports these helpers so every
//! user-facing line goes through the same catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Console observer and report rendering.
pub mod console;
/// Internationalization helpers and message catalog.
pub mod i18n;
