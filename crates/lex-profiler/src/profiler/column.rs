//! Per-column metric computation.

use super::statistics::{
    calculate_skewness, calculate_std, count_iqr_outliers, float_values, non_missing, non_zero,
    round_to, shannon_entropy, value_frequencies,
};
use crate::config::ProfilerConfig;
use crate::error::Result;
use crate::structure::structure_of_str_with_limit;
use crate::types::{ColumnMetrics, ColumnRole};
use crate::utils::is_numeric_like;
use polars::prelude::*;
use std::collections::HashMap;

/// Compute the metrics record of one column.
///
/// `total_rows` is the column length including missing entries. Returns
/// `None` when there is nothing to profile: no rows at all, or no value that
/// is not missing.
pub fn profile_column(
    series: &Series,
    role: ColumnRole,
    total_rows: usize,
    config: &ProfilerConfig,
) -> Result<Option<ColumnMetrics>> {
    if total_rows == 0 {
        return Ok(None);
    }

    let present = non_missing(series)?;
    let n = present.len();
    if n == 0 {
        return Ok(None);
    }

    let frequencies = value_frequencies(&present)?;
    let unique_count = frequencies.len();
    let unique_ratio = unique_count as f64 / total_rows as f64;

    let entropy = (1 < unique_count && unique_count < config.entropy_max_cardinality)
        .then(|| shannon_entropy(&frequencies));

    let dominant_share = frequencies.first().map(|top| top / n as f64);
    let near_zero_variance =
        dominant_share.is_some_and(|share| share > config.near_zero_variance_share);

    let likely_identifier = unique_ratio > config.identifier_unique_ratio
        && entropy.is_some_and(|e| e > config.identifier_min_entropy);

    // A zero entropy or share is reported as absent
    let mut metrics = ColumnMetrics::unconditional(
        unique_count,
        round_to(unique_ratio, 3),
        entropy.and_then(non_zero).map(|e| round_to(e, 2)),
        dominant_share
            .map(|share| share * 100.0)
            .and_then(non_zero)
            .map(|pct| round_to(pct, 1)),
        near_zero_variance,
        likely_identifier,
    );

    match role {
        ColumnRole::Numeric => add_numeric_metrics(&mut metrics, &present, total_rows, config)?,
        ColumnRole::Categorical => add_categorical_metrics(&mut metrics, &present, config)?,
        ColumnRole::Other => {}
    }

    Ok(Some(metrics))
}

fn add_numeric_metrics(
    metrics: &mut ColumnMetrics,
    present: &Series,
    total_rows: usize,
    config: &ProfilerConfig,
) -> Result<()> {
    let float_series = present.cast(&DataType::Float64)?;
    let values = float_values(&float_series)?;
    if values.is_empty() {
        return Ok(());
    }

    metrics.mean = float_series.mean().map(|m| round_to(m, 2));
    metrics.min = float_series.min::<f64>()?;
    metrics.max = float_series.max::<f64>()?;
    metrics.std = calculate_std(&values).map(|s| round_to(s, 2));

    let skewness = calculate_skewness(&values);
    metrics.skewness = skewness.map(|s| round_to(s, 2));
    metrics.highly_skewed = Some(skewness.is_some_and(|s| s.abs() > config.skew_threshold));

    // Quartiles are unreliable on small samples
    if values.len() > config.outlier_min_sample {
        let outliers = count_iqr_outliers(&values);
        let outlier_pct = outliers as f64 / total_rows as f64 * 100.0;
        metrics.outlier_pct = non_zero(outlier_pct).map(|pct| round_to(pct, 2));
    }

    Ok(())
}

fn add_categorical_metrics(
    metrics: &mut ColumnMetrics,
    present: &Series,
    config: &ProfilerConfig,
) -> Result<()> {
    let text_series = present.cast(&DataType::String)?;
    let texts = text_series.str()?;

    let mut total = 0usize;
    let mut numeric_like = 0usize;
    let mut patterns: HashMap<_, usize> = HashMap::new();

    for text in texts.into_iter().flatten() {
        total += 1;
        if is_numeric_like(text) {
            numeric_like += 1;
        }
        let pattern = structure_of_str_with_limit(text, config.max_structure_tokens);
        *patterns.entry(pattern).or_insert(0) += 1;
    }

    if total == 0 {
        return Ok(());
    }

    let ratio = numeric_like as f64 / total as f64;
    metrics.numeric_like_ratio = Some(round_to(ratio, 3));
    metrics.mixed_type_suspected =
        Some(config.mixed_type_lower < ratio && ratio < config.mixed_type_upper);

    let dominant_pattern = patterns.values().copied().max().unwrap_or(0);
    metrics.structure_pattern_count = Some(patterns.len());
    metrics.dominant_structure_pct =
        Some(round_to(dominant_pattern as f64 / total as f64 * 100.0, 1));

    Ok(())
}
