//! Cell parsing for survey extracts.
//!
//! Survey dates arrive in whatever shape the export tool produced, so
//! [`parse_survey_date`] tries a list of known formats. LCSI codes may be
//! written as integers or as integral floats (`"3.0"`) when the column was
//! round-tripped through a spreadsheet.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Datetime formats tried after RFC 3339, in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats, tried after every datetime format.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Parses a survey date cell. Returns `None` for blank or unrecognized
/// values; callers drop those rows.
#[must_use]
pub fn parse_survey_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Parses an LCSI code cell. Accepts integers and integral floats; anything
/// else (blank, text, fractional values) yields `None`.
#[must_use]
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
pub fn parse_strategy_code(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(code) = s.parse::<i64>() {
        return Some(code);
    }

    let value = s.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}
