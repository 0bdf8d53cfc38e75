//! Integration tests for growth-store
//!
//! These tests load external SQLite datasets from disk and check that the
//! resulting tables behave like the bundled ones.

use growth_domain::{interpolate, GrowthError, MeasurementType, ReferenceSource, Sex};
use growth_store::{ReferenceStore, StoreError, UNVERSIONED};
use rusqlite::{params, Connection};
use tempfile::TempDir;

const SCHEMA: &str = include_str!("../src/schema.sql");

type Row<'a> = (&'a str, &'a str, i64, f64, f64, f64);

fn dataset(dir: &TempDir, rows: &[Row<'_>], version: Option<&str>) -> std::path::PathBuf {
    let path = dir.path().join("reference.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();

    if let Some(version) = version {
        conn.execute(
            "INSERT INTO dataset_meta (key, value) VALUES ('version', ?1)",
            params![version],
        )
        .unwrap();
    }
    for (sex, measurement, age_days, l, m, s) in rows {
        conn.execute(
            "INSERT INTO lms_reference (sex, measurement, age_days, l, m, s)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![sex, measurement, age_days, l, m, s],
        )
        .unwrap();
    }
    path
}

#[test]
fn test_open_external_dataset() {
    let dir = TempDir::new().unwrap();
    let path = dataset(
        &dir,
        &[
            ("female", "weight", 0, 0.3809, 3.2322, 0.14171),
            ("female", "weight", 1, 0.3259, 3.1957, 0.14578),
            ("female", "weight", 2, 0.3101, 3.2104, 0.14637),
        ],
        Some("who-2006-daily"),
    );

    let store = ReferenceStore::open(&path).unwrap();
    assert_eq!(store.dataset_version(), "who-2006-daily");
    assert_eq!(store.len(), 1);

    let table = store.get_table(Sex::Female, MeasurementType::Weight).unwrap();
    assert_eq!(table.max_age(), 2);
    let lms = interpolate(table, 1).unwrap();
    assert_eq!(lms.m, 3.1957);

    assert!(matches!(
        store.get_table(Sex::Male, MeasurementType::Weight),
        Err(GrowthError::UnknownStandard { .. })
    ));
}

#[test]
fn test_rows_are_sorted_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dataset(
        &dir,
        &[
            ("male", "height", 61, 1.0, 58.4249, 0.03424),
            ("male", "height", 0, 1.0, 49.8842, 0.03795),
            ("male", "height", 30, 1.0, 54.7244, 0.03557),
        ],
        None,
    );

    let store = ReferenceStore::open(&path).unwrap();
    let table = store.get_table(Sex::Male, MeasurementType::Height).unwrap();
    let ages: Vec<u32> = table.rows().iter().map(|r| r.age_in_days).collect();
    assert_eq!(ages, vec![0, 30, 61]);
}

#[test]
fn test_missing_version_is_unversioned() {
    let dir = TempDir::new().unwrap();
    let path = dataset(&dir, &[("male", "bmi", 0, -0.3053, 13.4069, 0.0956)], None);

    let store = ReferenceStore::open(&path).unwrap();
    assert_eq!(store.dataset_version(), UNVERSIONED);
}

#[test]
fn test_unknown_measurement_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let path = dataset(&dir, &[("male", "arm_span", 0, 1.0, 50.0, 0.04)], None);

    let result = ReferenceStore::open(&path);
    assert!(matches!(result, Err(StoreError::InvalidData(_))));
}

#[test]
fn test_invalid_lms_is_reference_error() {
    let dir = TempDir::new().unwrap();
    let path = dataset(&dir, &[("female", "height", 0, 1.0, 49.1477, -0.0379)], None);

    let result = ReferenceStore::open(&path);
    assert!(matches!(
        result,
        Err(StoreError::Reference(GrowthError::InvalidReference(_)))
    ));
}

#[test]
fn test_missing_file_is_database_error() {
    let dir = TempDir::new().unwrap();
    let result = ReferenceStore::open(dir.path().join("absent.db"));
    assert!(matches!(result, Err(StoreError::Database(_))));
}
