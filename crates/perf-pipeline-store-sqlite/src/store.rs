// crates/perf-pipeline-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Performance Store
// Description: PerformanceStore backed by a SQLite database file.
// Purpose: Drop, recreate, and bulk load the employee performance table.
// Dependencies: perf-pipeline-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements [`PerformanceStore`] using `SQLite`. The store owns
//! exactly one connection, opened by [`SqlitePerformanceStore::connect`] and
//! released by [`PerformanceStore::close`] (or on drop). Batched inserts run
//! inside one transaction: either every row commits or none does.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use perf_pipeline_core::EmployeeRecord;
use perf_pipeline_core::ParameterTuple;
use perf_pipeline_core::PerformanceStore;
use perf_pipeline_core::StoreError;
use perf_pipeline_core::TableName;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` performance store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a config for `path` with default pragmas.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// The database could not be opened or configured.
    #[error("sqlite store connection error: {0}")]
    Connect(String),
    /// `SQLite` engine error while executing a statement.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Invalid store configuration.
    #[error("sqlite store invalid config: {0}")]
    Invalid(String),
    /// The connection was already closed.
    #[error("sqlite store closed")]
    Closed,
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message)
            | SqliteStoreError::Connect(message)
            | SqliteStoreError::Invalid(message) => Self::Connection(message),
            SqliteStoreError::Db(message) => Self::Query(message),
            SqliteStoreError::Closed => Self::Closed,
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed performance store owning one connection.
pub struct SqlitePerformanceStore {
    /// Store configuration.
    config: SqliteStoreConfig,
    /// Open connection; `None` once closed.
    connection: Option<Connection>,
}

impl SqlitePerformanceStore {
    /// Opens the database file, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid or the database
    /// cannot be opened.
    pub fn connect(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let connection = open_connection(&config)?;
        Ok(Self {
            config,
            connection: Some(connection),
        })
    }

    /// Returns the store configuration.
    #[must_use]
    pub const fn config(&self) -> &SqliteStoreConfig {
        &self.config
    }

    /// Returns true when `table` exists.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the catalog query fails.
    pub fn table_exists(&self, table: &TableName) -> Result<bool, SqliteStoreError> {
        let count: i64 = self
            .connection()?
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table.as_str()],
                |row| row.get(0),
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Ok(count > 0)
    }

    /// Reads every row of `table` ordered by identity.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails.
    pub fn fetch_records(
        &self,
        table: &TableName,
    ) -> Result<Vec<EmployeeRecord>, SqliteStoreError> {
        let connection = self.connection()?;
        let mut statement = connection
            .prepare(&format!(
                "SELECT id, employee_id, department, performance_score, years_with_company, \
                 salary FROM \"{table}\" ORDER BY id"
            ))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let rows = statement
            .query_map(params![], |row| {
                Ok(EmployeeRecord {
                    id: Some(row.get(0)?),
                    employee_id: row.get(1)?,
                    department: row.get(2)?,
                    performance_score: row.get(3)?,
                    years_with_company: row.get(4)?,
                    salary: row.get(5)?,
                })
            })
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|err| SqliteStoreError::Db(err.to_string()))
    }

    /// Returns the open connection.
    fn connection(&self) -> Result<&Connection, SqliteStoreError> {
        self.connection.as_ref().ok_or(SqliteStoreError::Closed)
    }

    /// Returns the open connection mutably.
    fn connection_mut(&mut self) -> Result<&mut Connection, SqliteStoreError> {
        self.connection.as_mut().ok_or(SqliteStoreError::Closed)
    }

    /// Executes a single DDL statement.
    fn execute_ddl(&self, sql: &str) -> Result<(), SqliteStoreError> {
        self.connection()?.execute_batch(sql).map_err(|err| SqliteStoreError::Db(err.to_string()))
    }

    /// Inserts every row inside one transaction.
    fn insert_rows(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, SqliteStoreError> {
        let connection = self.connection_mut()?;
        let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let mut inserted = 0_usize;
        {
            let mut statement = tx
                .prepare(&format!(
                    "INSERT INTO \"{table}\" (id, employee_id, department, performance_score, \
                     years_with_company, salary) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                ))
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            for row in rows {
                inserted += statement
                    .execute(params![
                        row.id,
                        row.employee_id,
                        row.department,
                        row.performance_score,
                        row.years_with_company,
                        row.salary
                    ])
                    .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            }
        }
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Ok(inserted)
    }
}

impl PerformanceStore for SqlitePerformanceStore {
    fn drop_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        self.execute_ddl(&format!("DROP TABLE IF EXISTS \"{table}\";")).map_err(StoreError::from)
    }

    fn create_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        self.execute_ddl(&format!(
            "CREATE TABLE \"{table}\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id INTEGER,
                department VARCHAR(50),
                performance_score DECIMAL(10, 2),
                years_with_company INTEGER,
                salary DECIMAL(10, 2)
            );"
        ))
        .map_err(StoreError::from)
    }

    fn insert_batch(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, StoreError> {
        self.insert_rows(table, rows).map_err(StoreError::from)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        let Some(connection) = self.connection.take() else {
            return Ok(());
        };
        connection.close().map_err(|(_, err)| StoreError::Connection(err.to_string()))
    }

    fn is_closed(&self) -> bool {
        self.connection.is_none()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.is_empty() {
        return Err(SqliteStoreError::Invalid("store path must be non-empty".to_string()));
    }
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Connect(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Connect(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Connect(err.to_string()))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Connect(err.to_string()))?;
    Ok(())
}
