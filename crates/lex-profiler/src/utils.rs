//! Shared dtype helpers for the profiler.

use crate::types::ColumnRole;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// Integer or decimal literal, optionally negative - compiled once at startup
static NUMERIC_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("Invalid regex: numeric-like"));

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType holds text.
#[inline]
pub fn is_textual_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Categorical(..) | DataType::Enum(..)
    )
}

/// Get the profiling role of a column from its storage type.
pub fn column_role(dtype: &DataType) -> ColumnRole {
    if is_numeric_dtype(dtype) {
        ColumnRole::Numeric
    } else if is_textual_dtype(dtype) {
        ColumnRole::Categorical
    } else {
        ColumnRole::Other
    }
}

/// Storage type name used as the key of `dtype_counts`.
pub fn dtype_name(dtype: &DataType) -> String {
    dtype.to_string()
}

/// Combining marks that Unicode also lists as alphabetic.
const COMBINING_MARK_RANGES: [(char, char); 17] = [
    ('\u{0300}', '\u{036F}'),
    ('\u{0483}', '\u{0489}'),
    ('\u{0591}', '\u{05C7}'),
    ('\u{0610}', '\u{061A}'),
    ('\u{064B}', '\u{065F}'),
    ('\u{0670}', '\u{0670}'),
    ('\u{06D6}', '\u{06E4}'),
    ('\u{06E7}', '\u{06ED}'),
    ('\u{0900}', '\u{0903}'),
    ('\u{093A}', '\u{093C}'),
    ('\u{093E}', '\u{094F}'),
    ('\u{0951}', '\u{0957}'),
    ('\u{0962}', '\u{0963}'),
    ('\u{1AB0}', '\u{1AFF}'),
    ('\u{1DC0}', '\u{1DFF}'),
    ('\u{20D0}', '\u{20FF}'),
    ('\u{FE20}', '\u{FE2F}'),
];

// Vulgar fractions are numeric but not digits
const FRACTION_RANGES: [(char, char); 3] = [
    ('\u{00BC}', '\u{00BE}'),
    ('\u{2150}', '\u{215F}'),
    ('\u{2189}', '\u{2189}'),
];

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// A letter: alphabetic, but not a letter-like number (`Ⅻ`) or a combining mark.
pub fn is_letter_char(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric() && !in_ranges(c, &COMBINING_MARK_RANGES)
}

/// A digit: decimal digits in any script plus superscript and circled forms.
///
/// Letter-like numbers (`Ⅻ`) and fractions (`½`) are not digits.
pub fn is_digit_char(c: char) -> bool {
    c.is_numeric() && !c.is_alphabetic() && !in_ranges(c, &FRACTION_RANGES)
}

/// Check if text is an integer or decimal literal (`-12`, `3.5`).
///
/// Thousands separators, exponents and leading `+` do not count.
pub fn is_numeric_like(s: &str) -> bool {
    NUMERIC_LIKE.is_match(s)
}
