//! Statistical helpers for column profiling.
//!
//! Counting and reductions are delegated to polars; moments, quartiles and
//! entropy are computed here so their exact definitions are pinned down.

use crate::structure::value_text;
use polars::prelude::*;
use std::collections::HashMap;

/// Drop nulls, and `NaN` for float columns.
pub(crate) fn non_missing(series: &Series) -> PolarsResult<Series> {
    let non_null = series.drop_nulls();
    if non_null.dtype().is_float() {
        let mask = non_null.is_not_nan()?;
        non_null.filter(&mask)
    } else {
        Ok(non_null)
    }
}

/// Occurrence count of every distinct value, most frequent first.
///
/// Falls back to grouping the textual form of each value for dtypes polars
/// cannot count directly.
pub(crate) fn value_frequencies(series: &Series) -> PolarsResult<Vec<f64>> {
    if series.is_empty() {
        return Ok(Vec::new());
    }

    let renamed = series.clone().with_name("value".into());
    match renamed.value_counts(true, false, "count".into(), false) {
        Ok(counts_df) => {
            let counts = counts_df
                .column("count")?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            Ok(counts.f64()?.into_iter().flatten().collect())
        }
        Err(_) => text_frequencies(series),
    }
}

fn text_frequencies(series: &Series) -> PolarsResult<Vec<f64>> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for idx in 0..series.len() {
        if let Some(text) = value_text(&series.get(idx)?) {
            *counts.entry(text).or_insert(0) += 1;
        }
    }

    let mut frequencies: Vec<f64> = counts.into_values().map(|c| c as f64).collect();
    frequencies.sort_by(|a, b| b.total_cmp(a));
    Ok(frequencies)
}

/// Non-missing values of a numeric series as `f64`.
pub(crate) fn float_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Shannon entropy in bits of a frequency distribution.
pub(crate) fn shannon_entropy(frequencies: &[f64]) -> f64 {
    let total: f64 = frequencies.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    frequencies
        .iter()
        .filter(|&&c| c > 0.0)
        .map(|&c| {
            let p = c / total;
            -p * p.log2()
        })
        .sum()
}

/// Sample standard deviation (ddof = 1); undefined below two values.
pub(crate) fn calculate_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Adjusted Fisher-Pearson skewness; undefined below three values.
///
/// A constant column has zero skewness.
pub(crate) fn calculate_skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }

    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / nf;

    // Float noise on a constant column would otherwise blow up the ratio
    if m2.abs() < 1e-14 {
        return Some(0.0);
    }

    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Quantile of sorted data with linear interpolation between ranks.
pub(crate) fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Count values outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`.
pub(crate) fn count_iqr_outliers(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let (Some(q1), Some(q3)) = (quantile_linear(&sorted, 0.25), quantile_linear(&sorted, 0.75))
    else {
        return 0;
    };
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    values
        .iter()
        .filter(|&&v| v < lower_bound || v > upper_bound)
        .count()
}

/// Round to `decimals` places, ties to even.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// `Some(value)` unless the value is exactly zero.
pub(crate) fn non_zero(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== non_missing tests ====================

    #[test]
    fn test_non_missing_drops_nulls_and_nan() {
        let series = Series::new("val".into(), &[Some(1.0f64), None, Some(f64::NAN), Some(4.0)]);
        let cleaned = non_missing(&series).unwrap();
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_non_missing_strings() {
        let series = Series::new("val".into(), &[Some("a"), None, Some("b")]);
        assert_eq!(non_missing(&series).unwrap().len(), 2);
    }

    // ==================== value_frequencies tests ====================

    #[test]
    fn test_value_frequencies_sorted_descending() {
        let series = Series::new("val".into(), &["a", "b", "a", "c", "a", "b"]);
        let freqs = value_frequencies(&series).unwrap();
        assert_eq!(freqs, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_value_frequencies_column_named_count() {
        let series = Series::new("count".into(), &[1i64, 1, 2]);
        let freqs = value_frequencies(&series).unwrap();
        assert_eq!(freqs, vec![2.0, 1.0]);
    }

    #[test]
    fn test_value_frequencies_empty() {
        let series = Series::new("val".into(), Vec::<f64>::new());
        assert!(value_frequencies(&series).unwrap().is_empty());
    }

    // ==================== shannon_entropy tests ====================

    #[test]
    fn test_entropy_two_equal_values_is_one_bit() {
        assert!((shannon_entropy(&[50.0, 50.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_uniform_sixteen_is_four_bits() {
        let freqs = vec![1.0; 16];
        assert!((shannon_entropy(&freqs) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_single_value_is_zero() {
        assert_eq!(shannon_entropy(&[10.0]), 0.0);
        assert_eq!(shannon_entropy(&[]), 0.0);
    }

    // ==================== calculate_std tests ====================

    #[test]
    fn test_calculate_std_basic() {
        // Mean = 3, sample variance = 10 / 4 = 2.5, std = sqrt(2.5)
        let std = calculate_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_std_single_value_undefined() {
        assert_eq!(calculate_std(&[5.0]), None);
        assert_eq!(calculate_std(&[]), None);
    }

    #[test]
    fn test_calculate_std_identical_values() {
        assert_eq!(calculate_std(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
    }

    // ==================== calculate_skewness tests ====================

    #[test]
    fn test_calculate_skewness_symmetric() {
        let skew = calculate_skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(skew.abs() < 1e-12);
    }

    #[test]
    fn test_calculate_skewness_matches_adjusted_estimator() {
        // 1, 1, 1, 1, 10: mean 2.8, m2 = 12.96, m3 = 69.984
        // g1 = 69.984 / 12.96^1.5 = 1.5, G1 = 1.5 * sqrt(20) / 3
        let skew = calculate_skewness(&[1.0, 1.0, 1.0, 1.0, 10.0]).unwrap();
        let expected = 1.5 * 20f64.sqrt() / 3.0;
        assert!((skew - expected).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_skewness_constant_is_zero() {
        assert_eq!(calculate_skewness(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
    }

    #[test]
    fn test_calculate_skewness_too_few_values() {
        assert_eq!(calculate_skewness(&[1.0, 2.0]), None);
    }

    // ==================== quantile / outlier tests ====================

    #[test]
    fn test_quantile_linear_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_linear(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_linear(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_linear(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile_linear(&[], 0.5), None);
    }

    #[test]
    fn test_count_iqr_outliers_with_outlier() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        assert_eq!(count_iqr_outliers(&values), 1);
    }

    #[test]
    fn test_count_iqr_outliers_none() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(count_iqr_outliers(&values), 0);
    }

    #[test]
    fn test_count_iqr_outliers_order_invariant() {
        let values = [100.0, 3.0, 9.0, 1.0, 7.0, 2.0, 8.0, 4.0, 6.0, 5.0];
        assert_eq!(count_iqr_outliers(&values), 1);
    }

    // ==================== rounding tests ====================

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 3), 0.123);
        assert_eq!(round_to(99.04, 1), 99.0);
        assert_eq!(round_to(-1.005, 0), -1.0);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(81.25, 1), 81.2);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn test_non_zero() {
        assert_eq!(non_zero(0.0), None);
        assert_eq!(non_zero(1.5), Some(1.5));
    }
}
