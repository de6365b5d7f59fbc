//! Dataset profiling.
//!
//! This module turns a `DataFrame` into a [`DatasetReport`]:
//! - Per-column metrics (uniqueness, entropy, dominance, moments, outliers)
//! - Per-column naming heuristics
//! - Dataset-wide shape, dtype distribution and missingness

mod column;
mod naming;
mod statistics;

use crate::config::ProfilerConfig;
use crate::error::{ProfilingError, Result, ResultExt};
use crate::types::{ColumnMetrics, DatasetReport, PRIVACY_NOTE};
use crate::utils::{column_role, dtype_name};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub use column::profile_column;
pub use naming::{case_pattern, profile_name};

/// Data profiler producing privacy-preserving structural reports.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile a dataset with the default configuration.
    pub fn profile(df: &DataFrame) -> Result<DatasetReport> {
        Self::profile_dataset(df, &ProfilerConfig::default())
    }

    /// Profile an entire dataset.
    ///
    /// Every column is visited once. Columns with nothing to profile (no rows,
    /// or only missing values) are left out of `column_profiles` but keep
    /// their naming profile and are counted in shape and dtype counts.
    pub fn profile_dataset(df: &DataFrame, config: &ProfilerConfig) -> Result<DatasetReport> {
        let (rows, cols) = df.shape();
        info!("Profiling dataset: {} rows x {} columns", rows, cols);

        let mut dtype_counts = BTreeMap::new();
        let mut high_missing_columns_pct = BTreeMap::new();
        let mut column_profiles = BTreeMap::new();
        let mut column_name_profiles = BTreeMap::new();

        for column in df.get_columns() {
            let name = column.name().to_string();
            let series = column.as_materialized_series();
            let role = column_role(series.dtype());

            *dtype_counts.entry(dtype_name(series.dtype())).or_insert(0) += 1;

            let total_rows = series.len();
            if let Some(missing_pct) = Self::missing_percentage(series)?
                && missing_pct > config.high_missing_threshold_pct
            {
                high_missing_columns_pct.insert(name.clone(), statistics::round_to(missing_pct, 2));
            }

            let metrics = profile_column(series, role, total_rows, config)
                .context(format!("Failed to profile column '{name}'"))?;
            debug!(
                column = %name,
                role = role.as_str(),
                profiled = metrics.is_some(),
                "Column profiled"
            );
            if let Some(metrics) = metrics {
                column_profiles.insert(name.clone(), metrics);
            }

            column_name_profiles.insert(name.clone(), profile_name(&name));
        }

        info!(
            "Profiled {} of {} columns ({} with high missingness)",
            column_profiles.len(),
            cols,
            high_missing_columns_pct.len()
        );

        Ok(DatasetReport {
            shape: (rows, cols),
            dtype_counts,
            high_missing_columns_pct,
            column_profiles,
            column_name_profiles,
            privacy_note: PRIVACY_NOTE.to_string(),
        })
    }

    /// Profile a single column of `df` by name.
    pub fn profile_named_column(
        df: &DataFrame,
        name: &str,
        config: &ProfilerConfig,
    ) -> Result<Option<ColumnMetrics>> {
        let column = df
            .column(name)
            .map_err(|_| ProfilingError::ColumnNotFound(name.to_string()))?;
        let series = column.as_materialized_series();
        profile_column(series, column_role(series.dtype()), df.height(), config)
    }

    /// Percentage of missing entries, or `None` for an empty column.
    fn missing_percentage(series: &Series) -> Result<Option<f64>> {
        let total = series.len();
        if total == 0 {
            return Ok(None);
        }
        let present = statistics::non_missing(series)?.len();
        Ok(Some((total - present) as f64 * 100.0 / total as f64))
    }
}
