// crates/perf-pipeline-store-postgres/src/store.rs
// ============================================================================
// Module: Postgres Performance Store
// Description: PerformanceStore over a single synchronous Postgres client.
// Purpose: Drop, recreate, and bulk load the employee performance table.
// Dependencies: perf-pipeline-core, postgres, serde, thiserror
// ============================================================================

//! ## Overview
//! The table name is always double-quoted so mixed-case names such as
//! `EmployeePerformance` survive Postgres identifier folding. Batches run in
//! one transaction; dropping an uncommitted transaction rolls it back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use perf_pipeline_core::ParameterTuple;
use perf_pipeline_core::PerformanceStore;
use perf_pipeline_core::StoreError;
use perf_pipeline_core::TableName;
use postgres::Client;
use postgres::NoTls;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Config
// ============================================================================

/// Postgres store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostgresStoreConfig {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password; empty means no password is sent.
    pub password: String,
    /// Database name.
    pub database: String,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for PostgresStoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "root".to_string(),
            password: String::new(),
            database: "companydata".to_string(),
            connect_timeout_ms: 5_000,
        }
    }
}

impl PostgresStoreConfig {
    /// Builds the client configuration.
    #[must_use]
    pub fn client_config(&self) -> postgres::Config {
        let mut config = postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .dbname(&self.database)
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms));
        if !self.password.is_empty() {
            config.password(&self.password);
        }
        config
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Postgres store errors.
#[derive(Debug, Error)]
pub enum PostgresStoreError {
    /// Server unreachable or authentication refused.
    #[error("postgres store connection error: {0}")]
    Connect(String),
    /// Statement failure.
    #[error("postgres store error: {0}")]
    Postgres(String),
    /// The connection was already closed.
    #[error("postgres store closed")]
    Closed,
}

impl From<PostgresStoreError> for StoreError {
    fn from(error: PostgresStoreError) -> Self {
        match error {
            PostgresStoreError::Connect(message) => Self::Connection(message),
            PostgresStoreError::Postgres(message) => Self::Query(message),
            PostgresStoreError::Closed => Self::Closed,
        }
    }
}

// ============================================================================
// SECTION: Statements
// ============================================================================

/// Returns the `DROP TABLE IF EXISTS` statement for `table`.
#[must_use]
pub fn drop_table_sql(table: &TableName) -> String {
    format!("DROP TABLE IF EXISTS \"{table}\"")
}

/// Returns the `CREATE TABLE` statement for `table`.
#[must_use]
pub fn create_table_sql(table: &TableName) -> String {
    format!(
        "CREATE TABLE \"{table}\" (id BIGSERIAL PRIMARY KEY, employee_id INTEGER, department \
         VARCHAR(50), performance_score NUMERIC(10, 2), years_with_company INTEGER, salary \
         NUMERIC(10, 2))"
    )
}

/// Returns the parameterized insert for `table`.
///
/// A null `$1` falls back to the identity sequence.
#[must_use]
pub fn insert_sql(table: &TableName) -> String {
    format!(
        "INSERT INTO \"{table}\" (id, employee_id, department, performance_score, \
         years_with_company, salary) VALUES (COALESCE($1::BIGINT, \
         nextval(pg_get_serial_sequence('\"{table}\"', 'id'))), $2::BIGINT, $3::TEXT, \
         $4::DOUBLE PRECISION, $5::BIGINT, $6::DOUBLE PRECISION)"
    )
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Postgres-backed performance store owning one client.
pub struct PostgresPerformanceStore {
    /// Open client; `None` once closed.
    client: Option<Client>,
}

impl PostgresPerformanceStore {
    /// Connects to the configured server.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresStoreError::Connect`] when the server is unreachable
    /// or rejects the credentials.
    pub fn connect(config: &PostgresStoreConfig) -> Result<Self, PostgresStoreError> {
        let client = config
            .client_config()
            .connect(NoTls)
            .map_err(|err| PostgresStoreError::Connect(err.to_string()))?;
        Ok(Self {
            client: Some(client),
        })
    }

    /// Returns the open client.
    fn client(&mut self) -> Result<&mut Client, PostgresStoreError> {
        self.client.as_mut().ok_or(PostgresStoreError::Closed)
    }

    /// Executes one DDL statement.
    fn execute_ddl(&mut self, sql: &str) -> Result<(), PostgresStoreError> {
        self.client()?
            .batch_execute(sql)
            .map_err(|err| PostgresStoreError::Postgres(err.to_string()))
    }

    /// Inserts every row inside one transaction.
    fn insert_rows(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, PostgresStoreError> {
        let mut tx = self
            .client()?
            .transaction()
            .map_err(|err| PostgresStoreError::Postgres(err.to_string()))?;
        let statement = tx
            .prepare(&insert_sql(table))
            .map_err(|err| PostgresStoreError::Postgres(err.to_string()))?;
        let mut inserted = 0_u64;
        for row in rows {
            inserted += tx
                .execute(
                    &statement,
                    &[
                        &row.id,
                        &row.employee_id,
                        &row.department,
                        &row.performance_score,
                        &row.years_with_company,
                        &row.salary,
                    ],
                )
                .map_err(|err| PostgresStoreError::Postgres(err.to_string()))?;
        }
        tx.commit().map_err(|err| PostgresStoreError::Postgres(err.to_string()))?;
        usize::try_from(inserted)
            .map_err(|_| PostgresStoreError::Postgres("row count overflow".to_string()))
    }
}

impl PerformanceStore for PostgresPerformanceStore {
    fn drop_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        self.execute_ddl(&drop_table_sql(table)).map_err(StoreError::from)
    }

    fn create_table(&mut self, table: &TableName) -> Result<(), StoreError> {
        self.execute_ddl(&create_table_sql(table)).map_err(StoreError::from)
    }

    fn insert_batch(
        &mut self,
        table: &TableName,
        rows: &[ParameterTuple],
    ) -> Result<usize, StoreError> {
        self.insert_rows(table, rows).map_err(StoreError::from)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        let Some(client) = self.client.take() else {
            return Ok(());
        };
        client.close().map_err(|err| StoreError::Connection(err.to_string()))
    }

    fn is_closed(&self) -> bool {
        self.client.is_none()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
