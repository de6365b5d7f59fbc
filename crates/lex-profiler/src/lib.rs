//! Privacy-Preserving Dataset Profiler
//!
//! Describes a tabular dataset through structural and statistical
//! properties only, built with Rust and Polars. No raw cell value ever
//! appears in the output.
//!
//! # Overview
//!
//! - **Structure Abstraction**: Values reduced to token sequences such as `ALPHA(3)-DIGIT(3)`
//! - **Column Profiling**: Uniqueness, entropy, dominance, moments, outliers, mixed-type checks
//! - **Name Profiling**: Case convention and semantic hints from column names alone
//! - **Dataset Reports**: Shape, dtype distribution, high-missingness columns
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_profiler::{DataProfiler, ProfilerConfig, load_dataset};
//! use std::path::PathBuf;
//!
//! let config = ProfilerConfig::default();
//! let df = load_dataset(PathBuf::from("data.csv"), &config)?.into_dataset()?;
//!
//! let report = DataProfiler::profile_dataset(&df, &config)?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```
//!
//! # Configuration
//!
//! Thresholds are carried by [`ProfilerConfig`]:
//!
//! ```rust,ignore
//! use lex_profiler::ProfilerConfig;
//!
//! let config = ProfilerConfig::builder()
//!     .high_missing_threshold_pct(25.0)   // Report columns with >25% missing
//!     .identifier_thresholds(0.9, 3.5)    // Looser identifier detection
//!     .outlier_min_sample(50)             // Need >50 values for outlier share
//!     .build()?;
//! ```
//!
//! # Unusable Inputs
//!
//! A path that does not lead to a CSV file is not an error by itself:
//!
//! ```rust,ignore
//! use lex_profiler::{LoadOutcome, load_dataset};
//!
//! match load_dataset(path, &config)? {
//!     LoadOutcome::Loaded(df) => { /* profile it */ }
//!     LoadOutcome::Unusable(source) => eprintln!("skipped {}: {}", source.path.display(), source.reason),
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod structure;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ProfilerConfig, ProfilerConfigBuilder};
pub use error::{ProfilingError, Result as ProfilingResult, ResultExt, UnusableReason};
pub use loader::{DatasetInput, LoadOutcome, UnusableSource, load_dataset};
pub use profiler::{DataProfiler, case_pattern, profile_column, profile_name};
pub use reporting::{ReportEnvelope, ReportWriter};
pub use structure::{
    MAX_STRUCTURE_TOKENS, StructurePattern, StructureToken, structure_of, structure_of_str,
};
pub use types::{
    CasePattern, ColumnMetrics, ColumnNameProfile, ColumnRole, DatasetReport, PRIVACY_NOTE,
};
pub use utils::{column_role, is_numeric_dtype, is_numeric_like};
