//! Integration tests for the dataset profiler.
//!
//! These tests verify end-to-end behavior from loading a CSV to the
//! serialized report.

use lex_profiler::{
    CasePattern, DataProfiler, DatasetInput, LoadOutcome, PRIVACY_NOTE, ProfilerConfig,
    ProfilingError, ReportEnvelope, ReportWriter, UnusableReason, load_dataset, profile_column,
    profile_name, structure_of,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::json;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> DataFrame {
    load_dataset(fixtures_path().join(filename), &ProfilerConfig::default())
        .expect("Failed to load fixture")
        .into_dataset()
        .expect("Fixture should be a usable CSV file")
}

fn shuffled(df: &DataFrame, seed: u64) -> DataFrame {
    let mut indices: Vec<IdxSize> = (0..df.height() as IdxSize).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    df.take(&IdxCa::from_vec("idx".into(), indices)).unwrap()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_orders_fixture() {
    let df = load_fixture("orders.csv");

    assert_eq!(df.shape(), (30, 6));
    assert_eq!(df.column("notes").unwrap().null_count(), 30);
}

#[test]
fn test_non_csv_fixture_is_unusable() {
    let path = fixtures_path().join("orders.txt");
    let outcome = load_dataset(path.clone(), &ProfilerConfig::default()).unwrap();

    match outcome {
        LoadOutcome::Unusable(source) => {
            assert_eq!(source.path, path);
            assert_eq!(source.reason, UnusableReason::NotCsv);
        }
        LoadOutcome::Loaded(_) => panic!("a .txt file must not be loaded"),
    }
}

#[test]
fn test_missing_file_is_unusable() {
    let outcome = load_dataset(
        fixtures_path().join("does_not_exist.csv"),
        &ProfilerConfig::default(),
    )
    .unwrap();

    let err = outcome.into_dataset().unwrap_err();
    assert!(matches!(
        err,
        ProfilingError::UnreadableSource {
            reason: UnusableReason::NotFound,
            ..
        }
    ));
    assert!(err.is_recoverable());
}

#[test]
fn test_json_inputs() {
    let path = fixtures_path().join("customers.csv");
    let input = DatasetInput::try_from(json!(path.to_str().unwrap())).unwrap();
    let df = load_dataset(input, &ProfilerConfig::default())
        .unwrap()
        .into_dataset()
        .unwrap();
    assert_eq!(df.shape(), (4, 4));

    let input = DatasetInput::try_from(json!({ "a": [1, 2], "b": ["x", "y"] })).unwrap();
    let outcome = load_dataset(input, &ProfilerConfig::default()).unwrap();
    assert!(outcome.is_loaded());

    let err = DatasetInput::try_from(json!(12)).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT_TYPE");
}

// ============================================================================
// Dataset Reports
// ============================================================================

#[test]
fn test_orders_report_overview() {
    let report = DataProfiler::profile(&load_fixture("orders.csv")).unwrap();

    assert_eq!(report.shape, (30, 6));
    assert_eq!(report.privacy_note, PRIVACY_NOTE);
    assert_eq!(report.dtype_counts.values().sum::<usize>(), 6);
    assert_eq!(report.column_name_profiles.len(), 6);
    assert_eq!(report.column_profiles.len(), 5);
}

#[test]
fn test_all_missing_column() {
    let report = DataProfiler::profile(&load_fixture("orders.csv")).unwrap();

    assert_eq!(report.high_missing_columns_pct.get("notes"), Some(&100.0));
    assert!(!report.column_profiles.contains_key("notes"));
    assert!(report.column_name_profiles.contains_key("notes"));
}

#[test]
fn test_orders_column_metrics() {
    let report = DataProfiler::profile(&load_fixture("orders.csv")).unwrap();

    let order_id = &report.column_profiles["order_id"];
    assert_eq!(order_id.unique_count, 30);
    assert!(order_id.likely_identifier);
    assert_eq!(report.likely_identifier_columns(), vec!["order_id"]);

    let unit_price = &report.column_profiles["unit_price"];
    assert_eq!(unit_price.outlier_pct, Some(3.33));
    assert_eq!(unit_price.max, Some(9999.0));
    assert_eq!(unit_price.highly_skewed, Some(true));

    let status = &report.column_profiles["status"];
    assert_eq!(status.entropy, Some(0.92));
    assert_eq!(status.dominant_value_pct, Some(66.7));
    assert_eq!(status.mixed_type_suspected, Some(false));

    let zip = &report.column_profiles["zip"];
    assert_eq!(zip.numeric_like_ratio, Some(0.5));
    assert_eq!(zip.mixed_type_suspected, Some(true));
    assert_eq!(zip.structure_pattern_count, Some(2));
}

#[test]
fn test_customers_report() {
    let report = DataProfiler::profile(&load_fixture("customers.csv")).unwrap();

    assert_eq!(report.high_missing_columns_pct.get("Age"), Some(&25.0));
    assert_eq!(report.high_missing_columns_pct.get("TotalRevenue"), Some(&25.0));
    assert_eq!(report.high_missing_columns_pct.get("signup_date"), Some(&25.0));
    assert!(!report.high_missing_columns_pct.contains_key("user_id"));

    let user_id = &report.column_name_profiles["user_id"];
    assert_eq!(user_id.case_pattern, CasePattern::SnakeCase);
    assert!(user_id.likely_id_column);

    let revenue = &report.column_name_profiles["TotalRevenue"];
    assert_eq!(revenue.case_pattern, CasePattern::PascalCase);
    assert!(revenue.likely_amount_column);

    assert!(report.column_name_profiles["signup_date"].likely_datetime_column);
}

#[test]
fn test_report_never_contains_raw_values() {
    let report = DataProfiler::profile(&load_fixture("orders.csv")).unwrap();
    let serialized = serde_json::to_string(&report).unwrap();

    for raw in ["ORD-1001", "pending", "shipped", "unknown", "10001"] {
        assert!(!serialized.contains(raw), "raw value '{raw}' leaked");
    }
}

// ============================================================================
// Column Properties
// ============================================================================

#[test]
fn test_structure_abstraction() {
    let pattern = structure_of(&AnyValue::String("abc123")).unwrap();
    assert_eq!(pattern.token_strings(), vec!["ALPHA(3)", "DIGIT(3)"]);
    assert!(structure_of(&AnyValue::Null).is_none());
}

#[test]
fn test_near_constant_numeric_column() {
    let mut values = vec![5.0f64; 99];
    values.push(6.0);
    let series = Series::new("reading".into(), values);
    let metrics = profile_column(
        &series,
        lex_profiler::ColumnRole::Numeric,
        100,
        &ProfilerConfig::default(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(metrics.dominant_value_pct, Some(99.0));
    assert!(metrics.near_zero_variance);
}

#[test]
fn test_balanced_categories() {
    let mut values = vec!["red"; 50];
    values.extend(vec!["blue"; 50]);
    let df = df!("color" => values).unwrap();
    let report = DataProfiler::profile(&df).unwrap();

    let color = &report.column_profiles["color"];
    assert_eq!(color.entropy, Some(1.0));
    assert!(!color.likely_identifier);
}

#[test]
fn test_outliers_require_enough_values() {
    let mut large: Vec<f64> = (1..=24).map(f64::from).collect();
    large.push(24_000.0);
    let small: Vec<f64> = (1..=10).map(f64::from).collect();

    let report = DataProfiler::profile(&df!("v" => large).unwrap()).unwrap();
    assert!(report.column_profiles["v"].outlier_pct.unwrap() > 0.0);

    let report = DataProfiler::profile(&df!("v" => small).unwrap()).unwrap();
    assert!(report.column_profiles["v"].outlier_pct.is_none());
}

#[test]
fn test_mixed_type_detection() {
    let df = df!("code" => &["123", "45.6", "abc", "def"]).unwrap();
    let report = DataProfiler::profile(&df).unwrap();

    assert_eq!(report.column_profiles["code"].mixed_type_suspected, Some(true));
}

#[test]
fn test_name_profiles() {
    let profile = profile_name("user_id");
    assert_eq!(profile.case_pattern, CasePattern::SnakeCase);
    assert!(profile.likely_id_column);

    let profile = profile_name("TotalRevenue");
    assert_eq!(profile.case_pattern, CasePattern::PascalCase);
    assert!(profile.likely_amount_column);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_report_is_deterministic() {
    let df = load_fixture("orders.csv");

    let first = serde_json::to_string(&DataProfiler::profile(&df).unwrap()).unwrap();
    let second = serde_json::to_string(&DataProfiler::profile(&df).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_report_ignores_row_order() {
    let df = load_fixture("orders.csv");

    let original = DataProfiler::profile(&df).unwrap();
    let reordered = DataProfiler::profile(&shuffled(&df, 42)).unwrap();
    assert_eq!(original, reordered);
}

// ============================================================================
// Configuration and Reports
// ============================================================================

#[test]
fn test_partial_config_from_json() {
    let config: ProfilerConfig =
        serde_json::from_str(r#"{ "high_missing_threshold_pct": 50.0 }"#).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.outlier_min_sample, ProfilerConfig::default().outlier_min_sample);

    let report = DataProfiler::profile_dataset(&load_fixture("customers.csv"), &config).unwrap();
    assert!(report.high_missing_columns_pct.is_empty());
}

#[test]
fn test_custom_outlier_sample_size() {
    let config = ProfilerConfig::builder()
        .outlier_min_sample(50)
        .build()
        .unwrap();
    let report = DataProfiler::profile_dataset(&load_fixture("orders.csv"), &config).unwrap();

    assert!(report.column_profiles["unit_price"].outlier_pct.is_none());
}

#[test]
fn test_emit_report_file() {
    let report = DataProfiler::profile(&load_fixture("customers.csv")).unwrap();
    let dir = std::env::temp_dir().join(format!("lex_profiler_it_{}", std::process::id()));

    let envelope = ReportEnvelope::new("customers.csv", &report);
    let path = ReportWriter::new(&dir)
        .write_report_to_file(&envelope, "customers")
        .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["report"]["privacy_note"], PRIVACY_NOTE);
    assert_eq!(written["input_file"], "customers.csv");

    std::fs::remove_dir_all(dir).ok();
}
