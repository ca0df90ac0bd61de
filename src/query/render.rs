use chrono::NaiveDate;
use log::warn;
use regex::Regex;
use std::sync::LazyLock;

use super::operators::{Category, Operator};
use crate::errors::FilterError;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:-(0[1-9]|1[012])(?:-(0[1-9]|[12][0-9]|3[01]))?)?$")
        .expect("date shape regex")
});

/// Accepts `YYYY`, `YYYY-MM` and `YYYY-MM-DD` naming a real calendar date.
///
/// # Errors
/// Returns `FilterError::DateFormat` carrying the rejected value.
pub fn validate_date(value: &str) -> Result<(), FilterError> {
    let invalid = || {
        warn!("rejecting date value {value}");
        FilterError::DateFormat(value.to_string())
    };
    let caps = DATE_RE.captures(value).ok_or_else(invalid)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let year = num(1).and_then(|y| i32::try_from(y).ok()).ok_or_else(invalid)?;
    let month = num(2).unwrap_or(1);
    let day = num(3).unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day).map(|_| ()).ok_or_else(invalid)
}

/// Wraps a value in AQL string-literal quotes. Embedded quotes are not escaped.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("'{value}'")
}

/// Right-hand side of a comparison for `op`.
///
/// Relational generics stay bare, the other generics are quoted, dates become a
/// `DATE_ISO8601` call, and array values pass through for the binding templates.
///
/// # Errors
/// Returns `FilterError::DateFormat` when a date-category value fails [`validate_date`].
pub fn render_value(op: Operator, value: &str) -> Result<String, FilterError> {
    match op.category() {
        Category::Generic if op.is_relational() => Ok(value.to_string()),
        Category::Generic => Ok(quote(value)),
        Category::Date => {
            validate_date(value)?;
            Ok(format!("DATE_ISO8601({})", quote(value)))
        }
        Category::Array => Ok(value.to_string()),
    }
}
