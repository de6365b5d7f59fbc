//! Naming-convention heuristics for column identifiers.
//!
//! Only the column name is inspected, never the column contents.

use crate::types::{CasePattern, ColumnNameProfile};
use crate::utils::{is_digit_char, is_letter_char};

const ID_KEYWORDS: [&str; 4] = ["id", "uuid", "key", "ref"];
const DATETIME_KEYWORDS: [&str; 3] = ["date", "time", "timestamp"];
const AMOUNT_KEYWORDS: [&str; 5] = ["amount", "price", "cost", "revenue", "salary"];
const COUNT_KEYWORDS: [&str; 4] = ["count", "num", "qty", "quantity"];
const RATIO_KEYWORDS: [&str; 4] = ["rate", "pct", "percent", "ratio"];

/// Build the naming profile of a column name. Total for any input.
pub fn profile_name(name: &str) -> ColumnNameProfile {
    let lowered = name.to_lowercase();
    let contains = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    ColumnNameProfile {
        length: name.chars().count(),
        token_count: token_count(name),
        contains_digit: name.chars().any(is_digit_char),
        contains_special_char: name
            .chars()
            .any(|c| !is_letter_char(c) && !c.is_numeric() && c != '_'),
        case_pattern: case_pattern(name),
        likely_id_column: contains(&ID_KEYWORDS),
        likely_datetime_column: contains(&DATETIME_KEYWORDS),
        likely_amount_column: contains(&AMOUNT_KEYWORDS),
        likely_count_column: contains(&COUNT_KEYWORDS),
        likely_ratio_column: contains(&RATIO_KEYWORDS),
    }
}

/// Non-empty tokens after treating `-` and space as `_`.
fn token_count(name: &str) -> usize {
    name.split(['_', '-', ' '])
        .filter(|token| !token.is_empty())
        .count()
}

/// Classify the naming convention, checked in priority order.
pub fn case_pattern(name: &str) -> CasePattern {
    let has_underscore = name.contains('_');

    if is_all_cased(name, char::is_uppercase) {
        CasePattern::Uppercase
    } else if is_all_cased(name, char::is_lowercase) && !has_underscore {
        CasePattern::Lowercase
    } else if has_underscore {
        CasePattern::SnakeCase
    } else if name.chars().next().is_some_and(char::is_uppercase) {
        CasePattern::PascalCase
    } else if name.chars().skip(1).any(char::is_uppercase) {
        CasePattern::CamelCase
    } else {
        CasePattern::Mixed
    }
}

/// Every cased character satisfies `case`, and at least one exists.
fn is_all_cased(name: &str, case: fn(char) -> bool) -> bool {
    let mut cased = name
        .chars()
        .filter(|c| c.is_uppercase() || c.is_lowercase())
        .peekable();
    cased.peek().is_some() && cased.all(case)
}
