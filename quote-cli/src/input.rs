//! Lenient parsing of numbers typed into the configurator forms.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid number '{input}'")]
pub struct ParseDecimalError {
    input: String,
}

/// `1234`, `-12.5`, `0.75`
static PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid regex"));

/// `2,5`, `1.234,56`, `12.500`
static DUTCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(\d{1,3}(\.\d{3})+|\d+)(,\d+)?$").expect("valid regex")
});

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// euro sign and spaces used as digit grouping.
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .trim_start_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Parses a number as typed on a Dutch form.
///
/// - Empty or whitespace-only input is treated as 0.
/// - A decimal point is accepted when it is the only separator (`"2.5"`).
/// - Otherwise the comma is the decimal separator and dots group thousands
///   (`"2,5"`, `"1.234,56"`).
///
/// Anything else is rejected and logged.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let canonical = if PLAIN.is_match(&normalized) {
        normalized
    } else if DUTCH.is_match(&normalized) {
        normalized.replace('.', "").replace(',', ".")
    } else {
        tracing::error!(input = %s, "invalid decimal");
        return Err(ParseDecimalError {
            input: s.to_string(),
        });
    };

    canonical.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
        }
    })
}
