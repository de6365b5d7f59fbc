//! Content-free structural fingerprints of scalar values.
//!
//! A fingerprint replaces every run of letters or digits with its length and
//! keeps only the shape of whitespace and punctuation, so `"AB-1234"` becomes
//! `ALPHA(2)-'-'-DIGIT(4)`. Formatting problems stay visible while the data
//! itself does not.

use crate::utils::{is_digit_char, is_letter_char};
use polars::prelude::AnyValue;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Number of tokens kept in a fingerprint.
pub const MAX_STRUCTURE_TOKENS: usize = 20;

/// Delimiter used when rendering a fingerprint as a single string.
pub const TOKEN_DELIMITER: &str = "-";

/// One element of a structural fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureToken {
    /// Maximal run of alphabetic characters.
    Alpha(usize),
    /// Maximal run of digit characters.
    Digit(usize),
    Newline,
    Tab,
    Return,
    Space,
    /// Any other single character.
    Literal(char),
}

impl fmt::Display for StructureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha(n) => write!(f, "ALPHA({n})"),
            Self::Digit(n) => write!(f, "DIGIT({n})"),
            Self::Newline => f.write_str("NEWLINE"),
            Self::Tab => f.write_str("TAB"),
            Self::Return => f.write_str("RETURN"),
            Self::Space => f.write_str("SPACE"),
            Self::Literal(c) => write!(f, "'{c}'"),
        }
    }
}

/// Ordered token sequence describing the shape of one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructurePattern {
    tokens: Vec<StructureToken>,
}

impl StructurePattern {
    /// The tokens in scan order.
    pub fn tokens(&self) -> &[StructureToken] {
        &self.tokens
    }

    /// The tokens rendered individually, e.g. `["ALPHA(3)", "DIGIT(3)"]`.
    pub fn token_strings(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for StructurePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(TOKEN_DELIMITER)?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Fingerprint a polars scalar, keeping at most [`MAX_STRUCTURE_TOKENS`].
///
/// Returns `None` for a missing value (null or float `NaN`), never an empty
/// pattern.
pub fn structure_of(value: &AnyValue<'_>) -> Option<StructurePattern> {
    structure_of_with_limit(value, MAX_STRUCTURE_TOKENS)
}

/// Fingerprint a polars scalar, keeping at most `max_tokens` tokens.
pub fn structure_of_with_limit(value: &AnyValue<'_>, max_tokens: usize) -> Option<StructurePattern> {
    value_text(value).map(|text| structure_of_str_with_limit(&text, max_tokens))
}

/// Fingerprint plain text, keeping at most [`MAX_STRUCTURE_TOKENS`].
pub fn structure_of_str(text: &str) -> StructurePattern {
    structure_of_str_with_limit(text, MAX_STRUCTURE_TOKENS)
}

/// Fingerprint plain text, keeping at most `max_tokens` tokens.
pub fn structure_of_str_with_limit(text: &str, max_tokens: usize) -> StructurePattern {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    // Tokens past the limit are never reported, so the scan stops early.
    while tokens.len() < max_tokens {
        let Some(c) = chars.next() else {
            break;
        };

        let token = if is_letter_char(c) {
            StructureToken::Alpha(1 + take_run(&mut chars, is_letter_char))
        } else if is_digit_char(c) {
            StructureToken::Digit(1 + take_run(&mut chars, is_digit_char))
        } else {
            match c {
                '\n' => StructureToken::Newline,
                '\t' => StructureToken::Tab,
                '\r' => StructureToken::Return,
                ' ' => StructureToken::Space,
                other => StructureToken::Literal(other),
            }
        };
        tokens.push(token);
    }

    StructurePattern { tokens }
}

/// Consume the rest of a run and return how many characters it held.
fn take_run(chars: &mut Peekable<Chars<'_>>, class: fn(char) -> bool) -> usize {
    let mut count = 0;
    while chars.next_if(|c| class(*c)).is_some() {
        count += 1;
    }
    count
}

/// Textual form of a scalar, or `None` when the value is missing.
///
/// Strings are taken verbatim, integral floats keep a trailing `.0` and
/// booleans render as `True`/`False`.
pub fn value_text(value: &AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some((*s).to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Boolean(b) => Some(if *b { "True" } else { "False" }.to_string()),
        AnyValue::Float32(v) => float_text(f64::from(*v)),
        AnyValue::Float64(v) => float_text(*v),
        other => Some(other.to_string()),
    }
}

fn float_text(v: f64) -> Option<String> {
    if v.is_nan() {
        return None;
    }
    if v.is_infinite() {
        return Some(if v > 0.0 { "inf" } else { "-inf" }.to_string());
    }

    // Shortest round-trip digits; the exponent picks the notation
    let scientific = format!("{v:e}");
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;

    if (-4..16).contains(&exponent) {
        let positional = v.to_string();
        if positional.contains('.') {
            Some(positional)
        } else {
            Some(format!("{positional}.0"))
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        Some(format!("{mantissa}e{sign}{:02}", exponent.abs()))
    }
}
