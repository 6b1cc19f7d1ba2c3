// crates/perf-pipeline-store-sqlite/tests/sqlite_store.rs
// ============================================================================
// Module: SQLite Performance Store Tests
// Description: Schema management and batch insert against real SQLite files.
// Purpose: Ensure idempotent schema reset, atomic batches, and clean close.
// Dependencies: perf-pipeline-core, perf-pipeline-store-sqlite, tempfile, proptest
// ============================================================================

//! ## Overview
//! Exercises [`SqlitePerformanceStore`] through the [`PerformanceStore`]
//! contract and through a full pipeline run.

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

use perf_pipeline_core::ParameterTuple;
use perf_pipeline_core::PerformanceStore;
use perf_pipeline_core::Pipeline;
use perf_pipeline_core::StoreError;
use perf_pipeline_core::TableName;
use perf_pipeline_store_sqlite::SqlitePerformanceStore;
use perf_pipeline_store_sqlite::SqliteStoreConfig;
use perf_pipeline_store_sqlite::SqliteStoreError;
use perf_pipeline_store_sqlite::SqliteStoreMode;
use perf_pipeline_store_sqlite::SqliteSyncMode;
use proptest::prelude::*;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn open_store(temp: &TempDir) -> SqlitePerformanceStore {
    SqlitePerformanceStore::connect(SqliteStoreConfig::for_path(temp.path().join("perf.db")))
        .expect("open store")
}

fn tuple(employee_id: i64, department: &str, score: f64) -> ParameterTuple {
    ParameterTuple {
        id: None,
        employee_id,
        department: department.to_string(),
        performance_score: score,
        years_with_company: 3,
        salary: 55_000.0,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn insert_assigns_sequential_identities() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    let table = TableName::default();
    store.drop_table(&table).unwrap();
    store.create_table(&table).unwrap();

    let rows = [tuple(1, "Marketing", 85.5), tuple(2, "Sales", 70.0)];
    let inserted = store.insert_batch(&table, &rows).unwrap();

    assert_eq!(inserted, 2);
    let records = store.fetch_records(&table).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, Some(1));
    assert_eq!(records[1].id, Some(2));
    assert_eq!(records[0].department, "Marketing");
    assert!((records[0].performance_score - 85.5).abs() < 1e-9);
    assert!((records[1].salary - 55_000.0).abs() < 1e-9);
}

#[test]
fn keyword_table_names_are_quoted() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);

    for name in ["Order", "Select", "Table"] {
        let table = TableName::parse(name).unwrap();
        store.drop_table(&table).unwrap();
        store.create_table(&table).unwrap();
        let inserted = store.insert_batch(&table, &[tuple(1, "Marketing", 85.5)]).unwrap();

        assert_eq!(inserted, 1);
        assert!(store.table_exists(&table).unwrap());
        assert_eq!(store.fetch_records(&table).unwrap()[0].id, Some(1));
    }
}

#[test]
fn drop_and_create_are_repeatable() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    let table = TableName::default();

    for _ in 0 .. 2 {
        store.drop_table(&table).unwrap();
        store.create_table(&table).unwrap();
        store.insert_batch(&table, &[tuple(7, "Sales", 60.0)]).unwrap();
    }

    assert!(store.table_exists(&table).unwrap());
    assert_eq!(store.fetch_records(&table).unwrap().len(), 1);
}

#[test]
fn drop_of_missing_table_succeeds() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    let table = TableName::parse("never_created").unwrap();
    store.drop_table(&table).unwrap();
    assert!(!store.table_exists(&table).unwrap());
}

#[test]
fn create_without_drop_fails_when_table_exists() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    let table = TableName::default();
    store.create_table(&table).unwrap();
    let err = store.create_table(&table).unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));
}

#[test]
fn failed_batch_rolls_back_every_row() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    let table = TableName::default();
    store.create_table(&table).unwrap();

    let mut first = tuple(1, "Marketing", 85.5);
    first.id = Some(10);
    let mut duplicate = tuple(2, "Sales", 70.0);
    duplicate.id = Some(10);
    let err = store.insert_batch(&table, &[first, duplicate]).unwrap_err();

    assert!(matches!(err, StoreError::Query(_)));
    assert!(store.fetch_records(&table).unwrap().is_empty());
}

#[test]
fn insert_into_missing_table_fails() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    let err = store
        .insert_batch(&TableName::parse("absent").unwrap(), &[tuple(1, "Sales", 1.0)])
        .unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));
}

#[test]
fn close_is_idempotent_and_blocks_later_calls() {
    let temp = TempDir::new().unwrap();
    let mut store = open_store(&temp);
    store.close().unwrap();
    store.close().unwrap();
    assert!(store.is_closed());
    let err = store.drop_table(&TableName::default()).unwrap_err();
    assert!(matches!(err, StoreError::Closed));
}

#[test]
fn data_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let table = TableName::default();
    {
        let mut store = open_store(&temp);
        store.create_table(&table).unwrap();
        store.insert_batch(&table, &[tuple(1, "Marketing", 85.5)]).unwrap();
        store.close().unwrap();
    }
    let store = open_store(&temp);
    assert_eq!(store.fetch_records(&table).unwrap().len(), 1);
}

#[test]
fn directory_path_is_rejected() {
    let temp = TempDir::new().unwrap();
    let result = SqlitePerformanceStore::connect(SqliteStoreConfig::for_path(temp.path()));
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn missing_parent_directory_is_created() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("deeper").join("perf.db");
    let config = SqliteStoreConfig {
        path: path.clone(),
        busy_timeout_ms: 100,
        journal_mode: SqliteStoreMode::Delete,
        sync_mode: SqliteSyncMode::Normal,
    };
    let mut store = SqlitePerformanceStore::connect(config).unwrap();
    store.create_table(&TableName::default()).unwrap();
    store.close().unwrap();
    assert!(path.exists());
}

#[test]
fn pipeline_run_persists_rows() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("Data.json");
    fs::write(
        &input,
        r#"[
            {"employee_id": 1, "department": "Marketing", "performance_score": 85.5,
             "years_with_company": 3, "salary": 55000},
            {"employee_id": 2, "department": "Sales", "performance_score": 70.0,
             "years_with_company": 5, "salary": 48000}
        ]"#,
    )
    .unwrap();
    let config = SqliteStoreConfig::for_path(temp.path().join("perf.db"));

    let summary = Pipeline::default()
        .run(
            &input,
            || SqlitePerformanceStore::connect(config.clone()).map_err(StoreError::from),
            None,
            &mut (),
        )
        .unwrap();
    assert_eq!(summary.rows_inserted, 2);

    let store = SqlitePerformanceStore::connect(config).unwrap();
    let records = store.fetch_records(&TableName::default()).unwrap();
    let ids: Vec<i64> = records.iter().map(|record| record.employee_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn batches_round_trip_in_order(scores in prop::collection::vec(0.0_f64 .. 100.0, 0 .. 24)) {
        let temp = TempDir::new().unwrap();
        let mut store = open_store(&temp);
        let table = TableName::default();
        store.create_table(&table).unwrap();
        let rows: Vec<ParameterTuple> = scores
            .iter()
            .zip(1_i64 ..)
            .map(|(score, employee_id)| tuple(employee_id, "Sales", *score))
            .collect();

        prop_assert_eq!(store.insert_batch(&table, &rows).unwrap(), rows.len());
        let records = store.fetch_records(&table).unwrap();
        prop_assert_eq!(records.len(), rows.len());
        for (record, row) in records.iter().zip(&rows) {
            prop_assert_eq!(record.employee_id, row.employee_id);
            prop_assert!((record.performance_score - row.performance_score).abs() < 1e-9);
        }
    }
}
