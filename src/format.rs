//! Display formatting shared by the console views.

use chrono::{NaiveDate, NaiveDateTime};

/// Placeholder shown for absent values.
pub const EMPTY: &str = "-";

/// `$1234.50`, or `-` when absent.
pub fn currency(amount: Option<f64>) -> String {
    match amount {
        Some(amount) => format!("${:.2}", amount),
        None => EMPTY.to_string(),
    }
}

/// `Jan 15, 2025`, or `-` when absent.
pub fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Calendar date of a timestamp, formatted like [`date`].
pub fn datetime(value: Option<NaiveDateTime>) -> String {
    date(value.map(|dt| dt.date()))
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(EMPTY)
}

/// Hours with one decimal, e.g. `2.5 h`.
pub fn hours(value: f64) -> String {
    format!("{:.1} h", value)
}
