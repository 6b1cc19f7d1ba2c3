// crates/perf-pipeline-core/src/runtime/loader.rs
// ============================================================================
// Module: Record Loader
// Description: Reads employee performance JSON into a PerformanceTable.
// Purpose: Parse bounded input files with fail-closed schema checks.
// Dependencies: serde_json, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The loader reads a JSON array of row objects and returns a
//! [`PerformanceTable`] in file order. Missing files, oversized files,
//! malformed JSON, and rows that do not match the expected column set all
//! fail; no partial table is ever returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::EmployeeRecord;
use crate::core::PerformanceTable;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum input file size accepted by the loader (64 MiB).
pub const MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Record loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path does not exist.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The input file could not be read.
    #[error("failed to read input file {}: {message}", .path.display())]
    Io {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },
    /// The input file exceeds the size limit.
    #[error("input file {} is {size} bytes (limit {limit})", .path.display())]
    TooLarge {
        /// Input path.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// The content is not valid JSON or does not match the expected columns.
    #[error("failed to parse input: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads a performance table from a JSON file using [`MAX_INPUT_BYTES`].
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] when the path does not exist and
/// [`LoadError::Parse`] when the content is malformed.
pub fn load_table(path: &Path) -> Result<PerformanceTable, LoadError> {
    load_table_with_limit(path, MAX_INPUT_BYTES)
}

/// Loads a performance table from a JSON file with an explicit size limit.
///
/// # Errors
///
/// Returns [`LoadError`] when the file is missing, unreadable, too large, or
/// malformed.
pub fn load_table_with_limit(path: &Path, max_bytes: usize) -> Result<PerformanceTable, LoadError> {
    let bytes = read_bytes_with_limit(path, max_bytes)?;
    load_table_from_slice(&bytes)
}

/// Parses a performance table from JSON text.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] when the content is malformed.
pub fn load_table_from_str(content: &str) -> Result<PerformanceTable, LoadError> {
    load_table_from_slice(content.as_bytes())
}

/// Parses a performance table from JSON bytes.
fn load_table_from_slice(bytes: &[u8]) -> Result<PerformanceTable, LoadError> {
    let records: Vec<EmployeeRecord> =
        serde_json::from_slice(bytes).map_err(|err| LoadError::Parse(err.to_string()))?;
    for (index, record) in records.iter().enumerate() {
        if !record.performance_score.is_finite() || !record.salary.is_finite() {
            return Err(LoadError::Parse(format!("row {index} has a non-finite number")));
        }
    }
    Ok(PerformanceTable::new(records))
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, LoadError> {
    let io_error = |err: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    let file = File::open(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            io_error(err)
        }
    })?;
    let size = file.metadata().map_err(io_error)?.len();
    let too_large = |size: u64| LoadError::TooLarge {
        path: path.to_path_buf(),
        size,
        limit: max_bytes,
    };
    let limit = u64::try_from(max_bytes).map_err(|_| too_large(size))?;
    if size > limit {
        return Err(too_large(size));
    }
    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(io_error)?;
    if bytes.len() > max_bytes {
        return Err(too_large(u64::try_from(bytes.len()).unwrap_or(u64::MAX)));
    }
    Ok(bytes)
}
