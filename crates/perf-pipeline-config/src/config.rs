// crates/perf-pipeline-config/src/config.rs
// ============================================================================
// Module: Pipeline Configuration
// Description: Configuration loading and validation for the pipeline.
// Purpose: Provide strict config parsing with hard limits and defaults.
// Dependencies: perf-pipeline-core, perf-pipeline-store-*, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `PERF_PIPELINE_CONFIG`, then the
//! default `perf-pipeline.toml`. Only the default file may be absent, in
//! which case built-in defaults apply. Unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use perf_pipeline_core::DEFAULT_HISTOGRAM_DEPARTMENT;
use perf_pipeline_core::MAX_INPUT_BYTES;
use perf_pipeline_core::PipelineOptions;
use perf_pipeline_core::TableName;
use perf_pipeline_store_postgres::PostgresStoreConfig;
use perf_pipeline_store_sqlite::SqliteStoreConfig;
use perf_pipeline_store_sqlite::SqliteStoreMode;
use perf_pipeline_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "perf-pipeline.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PERF_PIPELINE_CONFIG";
/// Environment variable used to supply the database password.
pub const PASSWORD_ENV_VAR: &str = "PERF_PIPELINE_DB_PASSWORD";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for `input.max_bytes`.
const MAX_INPUT_LIMIT_BYTES: usize = 1024 * 1024 * 1024;
/// Upper bound for database timeouts in milliseconds.
const MAX_TIMEOUT_MS: u64 = 300_000;
/// Smallest chart dimension in pixels.
const MIN_CHART_DIMENSION: u32 = 100;
/// Largest chart dimension in pixels.
const MAX_CHART_DIMENSION: u32 = 8192;
/// Default `SQLite` database file.
const DEFAULT_SQLITE_DATABASE: &str = "companydata.db";
/// Default Postgres database name.
const DEFAULT_POSTGRES_DATABASE: &str = "companydata";
/// Default Postgres port.
const DEFAULT_POSTGRES_PORT: u16 = 5432;

// ============================================================================
// SECTION: Config Root
// ============================================================================

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Input file settings.
    #[serde(default)]
    pub input: InputConfig,
    /// Target table settings.
    #[serde(default)]
    pub pipeline: PipelineSection,
    /// Chart output settings.
    #[serde(default)]
    pub charts: ChartsConfig,
    /// File the config was read from, if any (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PipelineConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, required) = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound && !required => {
                let config =
                    Self::default().with_password_override(env::var(PASSWORD_ENV_VAR).ok());
                config.validate()?;
                return Ok(config);
            }
            Err(err) => {
                return Err(ConfigError::Io(format!("{}: {err}", resolved.display())));
            }
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config =
            Self::from_toml_str(content)?.with_password_override(env::var(PASSWORD_ENV_VAR).ok());
        config.source = Some(resolved);
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed or carries
    /// unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Replaces the database password when `password` is present.
    #[must_use]
    pub fn with_password_override(mut self, password: Option<String>) -> Self {
        if let Some(password) = password {
            self.database.password = password;
        }
        self
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.input.validate()?;
        self.charts.validate()?;
        Ok(())
    }

    /// Returns the pipeline runner options.
    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            table_name: self.pipeline.table_name.clone(),
            histogram_department: self.charts.department.clone(),
            input_max_bytes: self.input.max_bytes,
        }
    }
}

// ============================================================================
// SECTION: Database
// ============================================================================

/// Supported relational backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseBackend {
    /// Embedded `SQLite` file.
    #[default]
    Sqlite,
    /// Postgres server.
    Postgres,
}

impl DatabaseBackend {
    /// Returns the config spelling of the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: DatabaseBackend,
    /// Server host (Postgres only).
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port (Postgres only).
    #[serde(default)]
    pub port: Option<u16>,
    /// Login user (Postgres only).
    #[serde(default = "default_user")]
    pub user: String,
    /// Login password (Postgres only).
    #[serde(default)]
    pub password: String,
    /// Database name, or file path for `SQLite`.
    #[serde(default)]
    pub database: Option<String>,
    /// `SQLite` busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
    /// Postgres connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            host: default_host(),
            port: None,
            user: default_user(),
            password: String::new(),
            database: None,
            busy_timeout_ms: default_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Store settings resolved for the selected backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// `SQLite` store settings.
    Sqlite(SqliteStoreConfig),
    /// Postgres store settings.
    Postgres(PostgresStoreConfig),
}

impl DatabaseConfig {
    /// Returns the database name or file, falling back to the backend default.
    #[must_use]
    pub fn database_name(&self) -> &str {
        match (&self.database, self.backend) {
            (Some(name), _) => name.as_str(),
            (None, DatabaseBackend::Sqlite) => DEFAULT_SQLITE_DATABASE,
            (None, DatabaseBackend::Postgres) => DEFAULT_POSTGRES_DATABASE,
        }
    }

    /// Returns the store settings for the selected backend.
    #[must_use]
    pub fn store_target(&self) -> StoreTarget {
        match self.backend {
            DatabaseBackend::Sqlite => StoreTarget::Sqlite(SqliteStoreConfig {
                path: PathBuf::from(self.database_name()),
                busy_timeout_ms: self.busy_timeout_ms,
                journal_mode: self.journal_mode,
                sync_mode: self.sync_mode,
            }),
            DatabaseBackend::Postgres => StoreTarget::Postgres(PostgresStoreConfig {
                host: self.host.clone(),
                port: self.port.unwrap_or(DEFAULT_POSTGRES_PORT),
                user: self.user.clone(),
                password: self.password.clone(),
                database: self.database_name().to_string(),
                connect_timeout_ms: self.connect_timeout_ms,
            }),
        }
    }

    /// Validates database settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.busy_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(
                "database.busy_timeout_ms exceeds limit".to_string(),
            ));
        }
        if self.connect_timeout_ms == 0 || self.connect_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(
                "database.connect_timeout_ms must be between 1 and 300000".to_string(),
            ));
        }
        match self.backend {
            DatabaseBackend::Sqlite => {
                validate_path_string("database.database", self.database_name())
            }
            DatabaseBackend::Postgres => {
                if self.host.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "database.host must be non-empty".to_string(),
                    ));
                }
                if self.user.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "database.user must be non-empty".to_string(),
                    ));
                }
                if self.database_name().trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "database.database must be non-empty".to_string(),
                    ));
                }
                if self.port == Some(0) {
                    return Err(ConfigError::Invalid(
                        "database.port must be non-zero".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Default database host.
fn default_host() -> String {
    "localhost".to_string()
}

/// Default database user.
fn default_user() -> String {
    "root".to_string()
}

/// Default `SQLite` busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    5_000
}

/// Default Postgres connect timeout.
const fn default_connect_timeout_ms() -> u64 {
    5_000
}

// ============================================================================
// SECTION: Input
// ============================================================================

/// Input file settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Path to the JSON input file.
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    /// Maximum input size in bytes.
    #[serde(default = "default_input_max_bytes")]
    pub max_bytes: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            max_bytes: default_input_max_bytes(),
        }
    }
}

impl InputConfig {
    /// Validates input settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("input.path", &self.path.to_string_lossy())?;
        if self.max_bytes == 0 || self.max_bytes > MAX_INPUT_LIMIT_BYTES {
            return Err(ConfigError::Invalid(
                "input.max_bytes must be between 1 and 1073741824".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default input file.
fn default_input_path() -> PathBuf {
    PathBuf::from("Data.json")
}

/// Default input size limit.
const fn default_input_max_bytes() -> usize {
    MAX_INPUT_BYTES
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Target table settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSection {
    /// Target table name.
    #[serde(default)]
    pub table_name: TableName,
}

// ============================================================================
// SECTION: Charts
// ============================================================================

/// Chart output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartsConfig {
    /// Whether charts are rendered at all.
    #[serde(default = "default_charts_enabled")]
    pub enabled: bool,
    /// Directory receiving the SVG files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Department whose histogram is rendered.
    #[serde(default = "default_department")]
    pub department: String,
    /// Chart width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Chart height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            enabled: default_charts_enabled(),
            output_dir: default_output_dir(),
            department: default_department(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ChartsConfig {
    /// Validates chart settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("charts.output_dir", &self.output_dir.to_string_lossy())?;
        if self.department.trim().is_empty() {
            return Err(ConfigError::Invalid("charts.department must be non-empty".to_string()));
        }
        for (field, value) in [("charts.width", self.width), ("charts.height", self.height)] {
            if !(MIN_CHART_DIMENSION ..= MAX_CHART_DIMENSION).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be between {MIN_CHART_DIMENSION} and {MAX_CHART_DIMENSION}"
                )));
            }
        }
        Ok(())
    }
}

/// Charts are on unless disabled.
const fn default_charts_enabled() -> bool {
    true
}

/// Default chart directory.
fn default_output_dir() -> PathBuf {
    PathBuf::from("charts")
}

/// Default histogram department.
fn default_department() -> String {
    DEFAULT_HISTOGRAM_DEPARTMENT.to_string()
}

/// Default chart width.
const fn default_width() -> u32 {
    800
}

/// Default chart height.
const fn default_height() -> u32 {
    600
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path and whether it must exist.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
