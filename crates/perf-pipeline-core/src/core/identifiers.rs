// crates/perf-pipeline-core/src/core/identifiers.rs
// ============================================================================
// Module: Store Identifiers
// Description: Validated SQL identifiers used when building statements.
// Purpose: Keep interpolated table names inside a safe identifier alphabet.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Table names are interpolated into DDL and DML because placeholders cannot
//! bind identifiers. [`TableName`] only admits `[A-Za-z_][A-Za-z0-9_]*` up to
//! [`MAX_TABLE_NAME_LENGTH`] characters, so a constructed value never needs
//! escaping. Stores still wrap it in double quotes because keywords such as
//! `Order` pass validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Table name used when no override is configured.
pub const DEFAULT_TABLE_NAME: &str = "EmployeePerformance";
/// Maximum accepted table name length.
pub const MAX_TABLE_NAME_LENGTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Table name validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableNameError {
    /// Name was empty.
    #[error("table name must be non-empty")]
    Empty,
    /// Name exceeded the length limit.
    #[error("table name exceeds {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Name contained a character outside the identifier alphabet.
    #[error("table name contains invalid character '{0}'")]
    InvalidCharacter(char),
}

// ============================================================================
// SECTION: Table Name
// ============================================================================

/// Validated relational table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Parses and validates a table name.
    ///
    /// # Errors
    ///
    /// Returns [`TableNameError`] when the name is empty, too long, or not a
    /// plain SQL identifier.
    pub fn parse(value: &str) -> Result<Self, TableNameError> {
        if value.is_empty() {
            return Err(TableNameError::Empty);
        }
        if value.len() > MAX_TABLE_NAME_LENGTH {
            return Err(TableNameError::TooLong {
                max: MAX_TABLE_NAME_LENGTH,
            });
        }
        for (index, ch) in value.chars().enumerate() {
            let allowed =
                ch == '_' || ch.is_ascii_alphabetic() || (index > 0 && ch.is_ascii_digit());
            if !allowed {
                return Err(TableNameError::InvalidCharacter(ch));
            }
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE_NAME.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for TableName {
    type Error = TableNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
