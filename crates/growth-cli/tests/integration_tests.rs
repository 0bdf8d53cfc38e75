//! Integration tests for growth-cli
//!
//! These tests write session files to a temporary directory and run the
//! session-driven commands against the bundled dataset.

use growth_cli::cli::{ChartArgs, ReportArgs, SessionArgs};
use growth_cli::commands;
use growth_cli::config::OutputFormat;
use growth_cli::{CliError, Config, Formatter};
use growth_domain::MeasurementType;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SESSION: &str = r#"
[child]
name = "Robin Lee"
date_of_birth = "2023-01-01"
sex = "female"

[[measurements]]
date = "2023-01-01"
height_cm = 49.2
weight_kg = 3.2
head_circumference_cm = 33.9

[[measurements]]
date = "2023-07-03"
height_cm = 65.8
weight_kg = 7.3
"#;

fn write_session(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("robin.toml");
    fs::write(&path, SESSION).unwrap();
    path
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[test]
fn test_latest_from_session() {
    let dir = TempDir::new().unwrap();
    let engine = Config::default().engine(None).unwrap();

    let args = SessionArgs {
        session: write_session(&dir),
    };
    commands::execute_latest(args, &engine, &quiet()).unwrap();
}

#[test]
fn test_chart_from_session() {
    let dir = TempDir::new().unwrap();
    let engine = Config::default().engine(None).unwrap();

    let args = ChartArgs {
        session: write_session(&dir),
        measure: MeasurementType::Weight,
    };
    commands::execute_chart(args, &engine, &quiet()).unwrap();
    assert_eq!(engine.cached_curve_sets(), 1);
}

#[test]
fn test_report_writes_json() {
    let dir = TempDir::new().unwrap();
    let engine = Config::default().engine(None).unwrap();
    let output = dir.path().join("out.json");

    let args = ReportArgs {
        session: write_session(&dir),
        output: Some(output.clone()),
        measure: vec![],
    };
    let written = commands::execute_report(args, &engine, &quiet()).unwrap();
    assert_eq!(written, output);

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(json["child"]["name"], "Robin Lee");
    assert_eq!(json["pages"].as_array().unwrap().len(), 4);
}

#[test]
fn test_report_selected_types() {
    let dir = TempDir::new().unwrap();
    let engine = Config::default().engine(None).unwrap();
    let output = dir.path().join("weights.json");

    let args = ReportArgs {
        session: write_session(&dir),
        output: Some(output.clone()),
        measure: vec![MeasurementType::Weight],
    };
    commands::execute_report(args, &engine, &quiet()).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    let pages = json["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["chart"]["measurement_type"], "weight");
}

#[test]
fn test_empty_session_report_fails() {
    let dir = TempDir::new().unwrap();
    let engine = Config::default().engine(None).unwrap();
    let path = dir.path().join("empty.json");
    fs::write(
        &path,
        r#"{"child": {"date_of_birth": "2023-01-01", "sex": "male"}}"#,
    )
    .unwrap();

    let args = ReportArgs {
        session: path,
        output: Some(dir.path().join("never.json")),
        measure: vec![],
    };
    let result = commands::execute_report(args, &engine, &quiet());
    assert!(matches!(result, Err(CliError::Engine(_))));
    assert!(!dir.path().join("never.json").exists());
}

#[test]
fn test_missing_dataset_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::default().engine(Some(&dir.path().join("absent.db")));
    assert!(matches!(result, Err(CliError::Store(_))));
}
