//! Dataset acquisition.
//!
//! Normalizes the accepted inputs (an in-memory table, a path to a CSV
//! file, or a JSON value describing either) into a `DataFrame`. A path that
//! cannot be used is reported as [`LoadOutcome::Unusable`] rather than an
//! error, and nothing here writes to the console.

use crate::config::ProfilerConfig;
use crate::error::{ProfilingError, Result, UnusableReason};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde_json::Value;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Input accepted by [`load_dataset`].
#[derive(Debug, Clone)]
pub enum DatasetInput {
    /// An already materialized table.
    Frame(DataFrame),
    /// A filesystem path expected to point at a `.csv` file.
    Path(PathBuf),
}

impl From<DataFrame> for DatasetInput {
    fn from(df: DataFrame) -> Self {
        DatasetInput::Frame(df)
    }
}

impl From<PathBuf> for DatasetInput {
    fn from(path: PathBuf) -> Self {
        DatasetInput::Path(path)
    }
}

impl From<&Path> for DatasetInput {
    fn from(path: &Path) -> Self {
        DatasetInput::Path(path.to_path_buf())
    }
}

/// Interpret a JSON value as an input.
///
/// A string is a path. An object whose values are equal-length arrays of
/// scalars is a table, one array per column. Anything else is rejected with
/// [`ProfilingError::InvalidInputType`].
impl TryFrom<Value> for DatasetInput {
    type Error = ProfilingError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(DatasetInput::Path(PathBuf::from(path))),
            Value::Object(columns) => table_from_json(columns).map(DatasetInput::Frame),
            other => Err(ProfilingError::InvalidInputType(json_kind(&other).to_string())),
        }
    }
}

/// A path that could not be used as a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusableSource {
    pub path: PathBuf,
    pub reason: UnusableReason,
}

/// Result of dataset acquisition.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(DataFrame),
    /// No usable dataset; the caller decides how to report it.
    Unusable(UnusableSource),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn dataset(&self) -> Option<&DataFrame> {
        match self {
            Self::Loaded(df) => Some(df),
            Self::Unusable(_) => None,
        }
    }

    /// Turn an unusable source into [`ProfilingError::UnreadableSource`].
    pub fn into_dataset(self) -> Result<DataFrame> {
        match self {
            Self::Loaded(df) => Ok(df),
            Self::Unusable(UnusableSource { path, reason }) => {
                Err(ProfilingError::UnreadableSource { path, reason })
            }
        }
    }
}

/// Acquire a dataset from any supported input.
pub fn load_dataset(input: impl Into<DatasetInput>, config: &ProfilerConfig) -> Result<LoadOutcome> {
    match input.into() {
        DatasetInput::Frame(df) => Ok(LoadOutcome::Loaded(df)),
        DatasetInput::Path(path) => {
            if let Some(reason) = check_csv_path(&path) {
                warn!("Cannot use '{}' as a dataset: {}", path.display(), reason);
                return Ok(LoadOutcome::Unusable(UnusableSource { path, reason }));
            }

            info!("Loading dataset from: {}", path.display());
            let df = load_csv_with_fallbacks(&path, config.infer_schema_length)?;
            info!("Dataset loaded successfully: {:?}", df.shape());
            Ok(LoadOutcome::Loaded(df))
        }
    }
}

/// Why `path` is not a loadable CSV file, if it is not.
fn check_csv_path(path: &Path) -> Option<UnusableReason> {
    if !path.exists() {
        Some(UnusableReason::NotFound)
    } else if !path.is_file() {
        Some(UnusableReason::NotAFile)
    } else if path.extension().and_then(|e| e.to_str()) != Some("csv") {
        Some(UnusableReason::NotCsv)
    } else {
        None
    }
}

/// Load CSV with multiple fallback strategies.
fn load_csv_with_fallbacks(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(infer_schema_length))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(infer_schema_length))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    let content = std::fs::read_to_string(path)?;
    let cleaned = clean_csv_content(&content);
    CsvReadOptions::default()
        .with_infer_schema_length(Some(infer_schema_length))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(ProfilingError::from)
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a table from `{ "column": [values...], ... }`.
fn table_from_json(columns: serde_json::Map<String, Value>) -> Result<DataFrame> {
    let mut height = None;
    let mut built = Vec::with_capacity(columns.len());

    for (name, values) in columns {
        let Value::Array(cells) = values else {
            return Err(ProfilingError::InvalidInputType(format!(
                "column '{name}' is a {}, expected an array",
                json_kind(&values)
            )));
        };

        match height {
            None => height = Some(cells.len()),
            Some(h) if h != cells.len() => {
                return Err(ProfilingError::InvalidInputType(format!(
                    "column '{name}' has {} values, expected {h}",
                    cells.len()
                )));
            }
            Some(_) => {}
        }

        built.push(column_from_json(&name, &cells)?);
    }

    Ok(DataFrame::new(built)?)
}

/// Pick the narrowest storage type that holds every cell of the column.
fn column_from_json(name: &str, cells: &[Value]) -> Result<Column> {
    if let Some(nested) = cells.iter().find(|c| c.is_array() || c.is_object()) {
        return Err(ProfilingError::InvalidInputType(format!(
            "column '{name}' contains a nested {}",
            json_kind(nested)
        )));
    }

    let present = || cells.iter().filter(|c| !c.is_null());
    let has_values = present().next().is_some();

    let series = if has_values && present().all(|c| c.is_i64()) {
        let values: Vec<Option<i64>> = cells.iter().map(Value::as_i64).collect();
        Series::new(name.into(), values)
    } else if has_values && present().all(Value::is_number) {
        let values: Vec<Option<f64>> = cells.iter().map(Value::as_f64).collect();
        Series::new(name.into(), values)
    } else if has_values && present().all(Value::is_boolean) {
        let values: Vec<Option<bool>> = cells.iter().map(Value::as_bool).collect();
        Series::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells.iter().map(json_cell_text).collect();
        Series::new(name.into(), values)
    };

    Ok(series.into_column())
}

fn json_cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        other => Some(other.to_string()),
    }
}
