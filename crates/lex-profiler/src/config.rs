//! Configuration types for the dataset profiler.
//!
//! Every threshold used by the column profiler lives here so callers can
//! tune the classification rules. The defaults match the documented
//! thresholds; changing them changes what the report flags, never what it is
//! allowed to expose.

use serde::{Deserialize, Serialize};

/// Configuration for the dataset profiler.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_profiler::config::ProfilerConfig;
///
/// let config = ProfilerConfig::builder()
///     .high_missing_threshold_pct(25.0)
///     .outlier_min_sample(50)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Columns whose missing percentage exceeds this value (0 - 100) are
    /// listed in `high_missing_columns_pct`.
    /// Default: 10.0
    pub high_missing_threshold_pct: f64,

    /// Share of the most frequent value (0.0 - 1.0) above which a column is
    /// flagged as near-zero variance.
    /// Default: 0.95
    pub near_zero_variance_share: f64,

    /// Entropy is computed only while `unique_count` stays below this bound.
    /// Default: 10000
    pub entropy_max_cardinality: usize,

    /// Unique ratio a column must exceed to be a likely identifier.
    /// Default: 0.95
    pub identifier_unique_ratio: f64,

    /// Entropy (bits) a column must exceed to be a likely identifier.
    /// Default: 4.0
    pub identifier_min_entropy: f64,

    /// Outlier percentage is computed only when more non-missing values than
    /// this are available.
    /// Default: 20
    pub outlier_min_sample: usize,

    /// Absolute skewness above which a column is flagged as highly skewed.
    /// Default: 2.0
    pub skew_threshold: f64,

    /// Lower (exclusive) bound of the numeric-like ratio for mixed typing.
    /// Default: 0.2
    pub mixed_type_lower: f64,

    /// Upper (exclusive) bound of the numeric-like ratio for mixed typing.
    /// Default: 0.8
    pub mixed_type_upper: f64,

    /// Maximum number of tokens kept in a structural fingerprint.
    /// Default: 20
    pub max_structure_tokens: usize,

    /// Number of rows the CSV reader scans to infer column types.
    /// Default: 100
    pub infer_schema_length: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            high_missing_threshold_pct: 10.0,
            near_zero_variance_share: 0.95,
            entropy_max_cardinality: 10_000,
            identifier_unique_ratio: 0.95,
            identifier_min_entropy: 4.0,
            outlier_min_sample: 20,
            skew_threshold: 2.0,
            mixed_type_lower: 0.2,
            mixed_type_upper: 0.8,
            max_structure_tokens: crate::structure::MAX_STRUCTURE_TOKENS,
            infer_schema_length: 100,
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=100.0).contains(&self.high_missing_threshold_pct) {
            return Err(ConfigValidationError::InvalidPercentage {
                field: "high_missing_threshold_pct".to_string(),
                value: self.high_missing_threshold_pct,
            });
        }

        for (field, value) in [
            ("near_zero_variance_share", self.near_zero_variance_share),
            ("identifier_unique_ratio", self.identifier_unique_ratio),
            ("mixed_type_lower", self.mixed_type_lower),
            ("mixed_type_upper", self.mixed_type_upper),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidRatio {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.mixed_type_lower >= self.mixed_type_upper {
            return Err(ConfigValidationError::InvertedMixedTypeBand {
                lower: self.mixed_type_lower,
                upper: self.mixed_type_upper,
            });
        }

        if self.identifier_min_entropy < 0.0 || self.skew_threshold < 0.0 {
            return Err(ConfigValidationError::NegativeThreshold);
        }

        if self.max_structure_tokens == 0 {
            return Err(ConfigValidationError::ZeroLimit(
                "max_structure_tokens".to_string(),
            ));
        }

        if self.infer_schema_length == 0 {
            return Err(ConfigValidationError::ZeroLimit(
                "infer_schema_length".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid percentage for '{field}': {value} (must be between 0 and 100)")]
    InvalidPercentage { field: String, value: f64 },

    #[error("Invalid ratio for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidRatio { field: String, value: f64 },

    #[error("Mixed-type band is empty: lower {lower} must be below upper {upper}")]
    InvertedMixedTypeBand { lower: f64, upper: f64 },

    #[error("Entropy and skew thresholds must not be negative")]
    NegativeThreshold,

    #[error("'{0}' must be at least 1")]
    ZeroLimit(String),
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    high_missing_threshold_pct: Option<f64>,
    near_zero_variance_share: Option<f64>,
    entropy_max_cardinality: Option<usize>,
    identifier_unique_ratio: Option<f64>,
    identifier_min_entropy: Option<f64>,
    outlier_min_sample: Option<usize>,
    skew_threshold: Option<f64>,
    mixed_type_band: Option<(f64, f64)>,
    max_structure_tokens: Option<usize>,
    infer_schema_length: Option<usize>,
}

impl ProfilerConfigBuilder {
    /// Set the missing percentage (0 - 100) above which a column is reported.
    pub fn high_missing_threshold_pct(mut self, pct: f64) -> Self {
        self.high_missing_threshold_pct = Some(pct);
        self
    }

    /// Set the dominant-value share (0.0 - 1.0) that marks near-zero variance.
    pub fn near_zero_variance_share(mut self, share: f64) -> Self {
        self.near_zero_variance_share = Some(share);
        self
    }

    /// Set the exclusive cardinality bound for entropy computation.
    pub fn entropy_max_cardinality(mut self, bound: usize) -> Self {
        self.entropy_max_cardinality = Some(bound);
        self
    }

    /// Set the unique ratio and entropy a likely identifier must exceed.
    pub fn identifier_thresholds(mut self, unique_ratio: f64, min_entropy: f64) -> Self {
        self.identifier_unique_ratio = Some(unique_ratio);
        self.identifier_min_entropy = Some(min_entropy);
        self
    }

    /// Set the sample size that must be exceeded before outliers are counted.
    pub fn outlier_min_sample(mut self, n: usize) -> Self {
        self.outlier_min_sample = Some(n);
        self
    }

    /// Set the absolute skewness that marks a column as highly skewed.
    pub fn skew_threshold(mut self, threshold: f64) -> Self {
        self.skew_threshold = Some(threshold);
        self
    }

    /// Set the exclusive numeric-like ratio band that signals mixed typing.
    pub fn mixed_type_band(mut self, lower: f64, upper: f64) -> Self {
        self.mixed_type_band = Some((lower, upper));
        self
    }

    /// Set how many structural tokens a fingerprint keeps.
    pub fn max_structure_tokens(mut self, max: usize) -> Self {
        self.max_structure_tokens = Some(max);
        self
    }

    /// Set how many rows the CSV reader scans to infer column types.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let defaults = ProfilerConfig::default();
        let (mixed_type_lower, mixed_type_upper) = self
            .mixed_type_band
            .unwrap_or((defaults.mixed_type_lower, defaults.mixed_type_upper));

        let config = ProfilerConfig {
            high_missing_threshold_pct: self
                .high_missing_threshold_pct
                .unwrap_or(defaults.high_missing_threshold_pct),
            near_zero_variance_share: self
                .near_zero_variance_share
                .unwrap_or(defaults.near_zero_variance_share),
            entropy_max_cardinality: self
                .entropy_max_cardinality
                .unwrap_or(defaults.entropy_max_cardinality),
            identifier_unique_ratio: self
                .identifier_unique_ratio
                .unwrap_or(defaults.identifier_unique_ratio),
            identifier_min_entropy: self
                .identifier_min_entropy
                .unwrap_or(defaults.identifier_min_entropy),
            outlier_min_sample: self.outlier_min_sample.unwrap_or(defaults.outlier_min_sample),
            skew_threshold: self.skew_threshold.unwrap_or(defaults.skew_threshold),
            mixed_type_lower,
            mixed_type_upper,
            max_structure_tokens: self
                .max_structure_tokens
                .unwrap_or(defaults.max_structure_tokens),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(defaults.infer_schema_length),
        };

        config.validate()?;
        Ok(config)
    }
}

static_assertions::assert_impl_all!(ProfilerConfig: Send, Sync);
