//! Numeric classification and coercion of raw cells.
//!
//! A cell is numeric-looking when its string form is an unsigned integer or
//! decimal: `^\d+(\.\d+)?$`. Signs, exponents and surrounding whitespace all
//! disqualify it, and only ASCII digits count.

use crate::cell::CellValue;
use regex::Regex;
use std::sync::OnceLock;

fn numeric_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid regex"))
}

/// Check whether a string matches the numeric-looking pattern
#[must_use]
pub fn is_numeric_str(s: &str) -> bool {
    numeric_regex().is_match(s)
}

/// Check whether a cell is numeric-looking
#[must_use]
pub fn is_numeric(cell: &CellValue) -> bool {
    match cell {
        CellValue::String(s) => is_numeric_str(s),
        CellValue::Null | CellValue::Bool(_) => false,
        other => is_numeric_str(&other.as_str()),
    }
}

/// Convert a numeric-looking cell to its float value.
///
/// Returns `None` for any cell that is not numeric-looking.
#[must_use]
pub fn to_number(cell: &CellValue) -> Option<f64> {
    if !is_numeric(cell) {
        return None;
    }
    match cell {
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(f) => Some(*f),
        other => other.as_str().parse().ok(),
    }
}

/// Zero-fill coercion: non-numeric cells read as `0.0`.
#[must_use]
pub fn to_number_or_zero(cell: &CellValue) -> f64 {
    to_number(cell).unwrap_or(0.0)
}
