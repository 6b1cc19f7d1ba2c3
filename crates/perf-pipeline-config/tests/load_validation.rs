// crates/perf-pipeline-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Tests for config file loading, defaults, and limits.
// Purpose: Ensure invalid configuration fails before the pipeline runs.
// Dependencies: perf-pipeline-config, perf-pipeline-core, tempfile
// ============================================================================

//! ## Overview
//! Loads configs from scratch directories through explicit paths so tests
//! never depend on the process environment.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;

use perf_pipeline_config::ConfigError;
use perf_pipeline_config::DatabaseBackend;
use perf_pipeline_config::MAX_CONFIG_FILE_SIZE;
use perf_pipeline_config::PipelineConfig;
use perf_pipeline_config::StoreTarget;
use perf_pipeline_core::TableName;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn write_config(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join("perf-pipeline.toml");
    fs::write(&path, content).unwrap();
    path
}

fn load_str(content: &str) -> Result<PipelineConfig, ConfigError> {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, content);
    PipelineConfig::load(Some(&path))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn empty_file_yields_defaults() {
    let config = load_str("").unwrap();
    assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
    assert_eq!(config.database.database_name(), "companydata.db");
    assert_eq!(config.input.path, PathBuf::from("Data.json"));
    assert_eq!(config.pipeline.table_name, TableName::default());
    assert!(config.charts.enabled);
    assert_eq!(config.charts.department, "Marketing");
    assert!(config.source.is_some());
}

#[test]
fn full_postgres_config_round_trips_into_store_target() {
    let config = load_str(
        r#"
[database]
backend = "postgres"
host = "db.internal"
port = 6543
user = "analyst"
password = "hunter2"
database = "hr"
connect_timeout_ms = 2500

[input]
path = "exports/Data.json"
max_bytes = 4096

[pipeline]
table_name = "perf_2024"

[charts]
enabled = false
output_dir = "out"
department = "Sales"
width = 1024
height = 768
"#,
    )
    .unwrap();

    let StoreTarget::Postgres(store) = config.database.store_target() else {
        panic!("expected postgres target");
    };
    assert_eq!(store.host, "db.internal");
    assert_eq!(store.port, 6543);
    assert_eq!(store.user, "analyst");
    assert_eq!(store.password, "hunter2");
    assert_eq!(store.database, "hr");
    assert_eq!(store.connect_timeout_ms, 2500);

    let options = config.pipeline_options();
    assert_eq!(options.table_name.as_str(), "perf_2024");
    assert_eq!(options.histogram_department, "Sales");
    assert_eq!(options.input_max_bytes, 4096);
    assert!(!config.charts.enabled);
}

#[test]
fn postgres_defaults_use_standard_port_and_database() {
    let config = load_str("[database]\nbackend = \"postgres\"\n").unwrap();
    let StoreTarget::Postgres(store) = config.database.store_target() else {
        panic!("expected postgres target");
    };
    assert_eq!(store.port, 5432);
    assert_eq!(store.database, "companydata");
    assert_eq!(store.user, "root");
    assert!(store.password.is_empty());
}

#[test]
fn sqlite_target_uses_database_as_path() {
    let config = load_str("[database]\ndatabase = \"data/perf.db\"\n").unwrap();
    let StoreTarget::Sqlite(store) = config.database.store_target() else {
        panic!("expected sqlite target");
    };
    assert_eq!(store.path, PathBuf::from("data/perf.db"));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = load_str("[database]\nbackend = \"sqlite\"\nflavor = \"mysql\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = load_str("[extras]\nenabled = true\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_backend_is_rejected() {
    let err = load_str("[database]\nbackend = \"mysql\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn invalid_table_name_is_rejected() {
    let err = load_str("[pipeline]\ntable_name = \"drop table;\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_input_limit_is_invalid() {
    let err = load_str("[input]\nmax_bytes = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn chart_dimensions_are_bounded() {
    let err = load_str("[charts]\nwidth = 10\n").unwrap_err();
    assert!(err.to_string().contains("charts.width"));
    let err = load_str("[charts]\nheight = 100000\n").unwrap_err();
    assert!(err.to_string().contains("charts.height"));
}

#[test]
fn empty_department_is_invalid() {
    let err = load_str("[charts]\ndepartment = \"  \"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn postgres_requires_host() {
    let err = load_str("[database]\nbackend = \"postgres\"\nhost = \"\"\n").unwrap_err();
    assert!(err.to_string().contains("database.host"));
}

#[test]
fn timeout_limits_are_enforced() {
    let err = load_str("[database]\nconnect_timeout_ms = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = load_str("[database]\nbusy_timeout_ms = 900000\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.toml");
    let err = PipelineConfig::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn oversized_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("big.toml");
    fs::write(&path, "#".repeat(MAX_CONFIG_FILE_SIZE + 1)).unwrap();
    let err = PipelineConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("size limit"));
}

#[test]
fn non_utf8_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("binary.toml");
    fs::write(&path, [0xff_u8, 0xfe, 0x00]).unwrap();
    let err = PipelineConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("utf-8"));
}

#[test]
fn password_override_replaces_configured_value() {
    let config = PipelineConfig::from_toml_str("[database]\npassword = \"file\"\n")
        .unwrap()
        .with_password_override(Some("env".to_string()));
    assert_eq!(config.database.password, "env");

    let untouched = PipelineConfig::from_toml_str("[database]\npassword = \"file\"\n")
        .unwrap()
        .with_password_override(None);
    assert_eq!(untouched.database.password, "file");
}
