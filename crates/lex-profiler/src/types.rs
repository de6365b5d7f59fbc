use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed note attached to every report.
pub const PRIVACY_NOTE: &str =
    "All metrics derived from structural and schema-level properties only.";

/// How a column is profiled, taken from its storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Integer or floating point storage.
    Numeric,
    /// Textual storage (strings, categoricals).
    Categorical,
    /// Anything else: booleans, temporal, nested, binary.
    Other,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Other => "other",
        }
    }
}

/// Naming convention detected in a column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CasePattern {
    #[serde(rename = "UPPERCASE")]
    Uppercase,
    #[serde(rename = "lowercase")]
    Lowercase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "mixed")]
    Mixed,
}

impl CasePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uppercase => "UPPERCASE",
            Self::Lowercase => "lowercase",
            Self::SnakeCase => "snake_case",
            Self::PascalCase => "PascalCase",
            Self::CamelCase => "camelCase",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for CasePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived metrics for one column.
///
/// Fields set to `None` were not applicable to the column (wrong role, too
/// few values, or a zero result under the falsy-zero policy) and are left
/// out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetrics {
    pub unique_count: usize,
    pub unique_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entropy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_value_pct: Option<f64>,
    pub near_zero_variance: bool,
    pub likely_identifier: bool,

    // Numeric columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skewness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highly_skewed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlier_pct: Option<f64>,

    // Categorical columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_like_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_type_suspected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_pattern_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_structure_pct: Option<f64>,
}

impl ColumnMetrics {
    /// A record carrying only the unconditional fields.
    pub(crate) fn unconditional(
        unique_count: usize,
        unique_ratio: f64,
        entropy: Option<f64>,
        dominant_value_pct: Option<f64>,
        near_zero_variance: bool,
        likely_identifier: bool,
    ) -> Self {
        Self {
            unique_count,
            unique_ratio,
            entropy,
            dominant_value_pct,
            near_zero_variance,
            likely_identifier,
            mean: None,
            std: None,
            min: None,
            max: None,
            skewness: None,
            highly_skewed: None,
            outlier_pct: None,
            numeric_like_ratio: None,
            mixed_type_suspected: None,
            structure_pattern_count: None,
            dominant_structure_pct: None,
        }
    }
}

/// Naming profile of a column identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNameProfile {
    pub length: usize,
    pub token_count: usize,
    pub contains_digit: bool,
    pub contains_special_char: bool,
    pub case_pattern: CasePattern,
    pub likely_id_column: bool,
    pub likely_datetime_column: bool,
    pub likely_amount_column: bool,
    pub likely_count_column: bool,
    pub likely_ratio_column: bool,
}

/// Structural profile of a whole dataset.
///
/// Per-column maps are keyed by column name and ordered by it, so the same
/// dataset always serializes to the same JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// `(rows, columns)`
    pub shape: (usize, usize),
    /// Storage dtype name -> number of columns with that dtype.
    pub dtype_counts: BTreeMap<String, usize>,
    /// Missing percentage for columns above the high-missing threshold.
    pub high_missing_columns_pct: BTreeMap<String, f64>,
    pub column_profiles: BTreeMap<String, ColumnMetrics>,
    pub column_name_profiles: BTreeMap<String, ColumnNameProfile>,
    pub privacy_note: String,
}

impl DatasetReport {
    pub fn row_count(&self) -> usize {
        self.shape.0
    }

    pub fn column_count(&self) -> usize {
        self.shape.1
    }

    /// Columns flagged as likely identifiers, in name order.
    pub fn likely_identifier_columns(&self) -> Vec<&str> {
        self.column_profiles
            .iter()
            .filter(|(_, metrics)| metrics.likely_identifier)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

static_assertions::assert_impl_all!(DatasetReport: Send, Sync);
static_assertions::assert_impl_all!(ColumnMetrics: Send, Sync);
