//! Shared helpers for dtype inspection, value parsing, and quantiles.
//!
//! Everything in here is pure: no logging, no configuration, no state.
//! The profiling stages build their behavior out of these primitives.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// =============================================================================
// Data Type Utilities
// =============================================================================

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

/// Check if a DataType carries calendar dates. `Time` is excluded: a
/// time-of-day without a date has no place on the supported-format list.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Datetime(_, _) | DataType::Date)
}

/// Check if a DataType holds text.
#[inline]
pub fn is_string_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Check if a DataType is one the classifier can reason about at all.
/// Nested and opaque types (List, Struct, Binary, Null, ...) are not.
#[inline]
pub fn is_supported_dtype(dtype: &DataType) -> bool {
    is_numeric_dtype(dtype)
        || is_datetime_dtype(dtype)
        || is_string_dtype(dtype)
        || matches!(dtype, DataType::Boolean)
}

// =============================================================================
// Value Parsing
// =============================================================================

/// Try to parse a string as a numeric value.
///
/// Plain integer and float literals only, surrounding whitespace ignored.
/// NaN text is rejected: a value that only parses to NaN cannot be told
/// apart from a missing one downstream.
///
/// # Example
///
/// ```rust,ignore
/// use datasight_profiling::utils::parse_numeric_value;
///
/// assert_eq!(parse_numeric_value(" 42 "), Some(42.0));
/// assert_eq!(parse_numeric_value("-3.5"), Some(-3.5));
/// assert_eq!(parse_numeric_value("n/a"), None);
/// ```
pub fn parse_numeric_value(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(v),
        _ => None,
    }
}

/// Check if a string is an integer literal (no decimal point, no exponent).
pub fn is_integer_text(s: &str) -> bool {
    s.trim().parse::<i64>().is_ok()
}

// Supported date format regexes paired with their chrono format strings,
// compiled once at startup. The `true` flag marks formats with a time part.
static DATE_FORMATS: Lazy<Vec<(Regex, &'static str, bool)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
            "%Y-%m-%d",
            false,
        ),
        (
            Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").expect("Invalid regex: YYYY/MM/DD"),
            "%Y/%m/%d",
            false,
        ),
        (
            Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("Invalid regex: MM/DD/YYYY"),
            "%m/%d/%Y",
            false,
        ),
        (
            Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").expect("Invalid regex: DD-MM-YYYY"),
            "%d-%m-%Y",
            false,
        ),
        (
            Regex::new(r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}$")
                .expect("Invalid regex: datetime"),
            "%Y-%m-%d %H:%M:%S",
            true,
        ),
        (
            Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}$")
                .expect("Invalid regex: ISO datetime"),
            "%Y-%m-%dT%H:%M:%S",
            true,
        ),
    ]
});

/// Try to parse a string as a date or timestamp under the supported formats.
///
/// The regex is a cheap shape filter; chrono does the actual validation, so
/// a shape match with an impossible calendar date (month 13, day 32) still
/// falls through. Date-only values resolve to midnight.
pub fn parse_datetime_value(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for (pattern, format, has_time) in DATE_FORMATS.iter() {
        if !pattern.is_match(trimmed) {
            continue;
        }
        if *has_time {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(dt);
            }
        } else if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

// =============================================================================
// Series Extraction
// =============================================================================

/// Extract a series as position-aligned optional floats.
///
/// Native numeric columns cast directly; everything else renders to text
/// and goes through [`parse_numeric_value`] per value. Unparseable entries
/// and nulls both land as `None`, which is what pairwise deletion in the
/// correlation stage needs.
pub fn numeric_values(series: &Series) -> Vec<Option<f64>> {
    if is_numeric_dtype(series.dtype()) {
        return series
            .cast(&DataType::Float64)
            .ok()
            .and_then(|s| s.f64().ok().map(|ca| ca.into_iter().collect::<Vec<_>>()))
            .unwrap_or_else(|| vec![None; series.len()]);
    }
    series
        .cast(&DataType::String)
        .ok()
        .and_then(|s| {
            s.str().ok().map(|ca| {
                ca.into_iter()
                    .map(|v| v.and_then(parse_numeric_value))
                    .collect()
            })
        })
        .unwrap_or_else(|| vec![None; series.len()])
}

/// Extract the non-missing values of a series as floats, in row order.
pub fn numeric_values_dense(series: &Series) -> Vec<f64> {
    numeric_values(series).into_iter().flatten().collect()
}

/// Extract the non-missing values of a series rendered as strings,
/// in row order.
pub fn string_values(series: &Series) -> Vec<String> {
    series
        .drop_nulls()
        .cast(&DataType::String)
        .ok()
        .and_then(|s| {
            s.str()
                .ok()
                .map(|ca| ca.into_iter().flatten().map(str::to_string).collect())
        })
        .unwrap_or_default()
}

/// Extract the non-missing values of a series as timestamps, in row order.
///
/// Native Date and Datetime columns convert through their physical
/// representation; string columns parse under the supported formats, with
/// unparseable entries dropped.
pub fn datetime_values(series: &Series) -> Vec<NaiveDateTime> {
    match series.dtype() {
        DataType::Date => series
            .cast(&DataType::Int32)
            .ok()
            .and_then(|s| {
                s.i32().ok().map(|ca| {
                    ca.into_iter()
                        .flatten()
                        .filter_map(days_to_datetime)
                        .collect()
                })
            })
            .unwrap_or_default(),
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            series
                .cast(&DataType::Int64)
                .ok()
                .and_then(|s| {
                    s.i64().ok().map(|ca| {
                        ca.into_iter()
                            .flatten()
                            .filter_map(|v| timestamp_to_datetime(v, unit))
                            .collect()
                    })
                })
                .unwrap_or_default()
        }
        _ => string_values(series)
            .iter()
            .filter_map(|v| parse_datetime_value(v))
            .collect(),
    }
}

fn days_to_datetime(days: i32) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(days as i64 * 86_400, 0).map(|dt| dt.naive_utc())
}

fn timestamp_to_datetime(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let (secs, nanos) = match unit {
        TimeUnit::Milliseconds => (value.div_euclid(1_000), value.rem_euclid(1_000) * 1_000_000),
        TimeUnit::Microseconds => (value.div_euclid(1_000_000), value.rem_euclid(1_000_000) * 1_000),
        TimeUnit::Nanoseconds => (
            value.div_euclid(1_000_000_000),
            value.rem_euclid(1_000_000_000),
        ),
    };
    DateTime::<Utc>::from_timestamp(secs, nanos as u32).map(|dt| dt.naive_utc())
}

// =============================================================================
// Quantiles
// =============================================================================

/// Quantile of an ascending-sorted slice by linear interpolation.
///
/// `q` is a fraction in [0, 1]; the position is `q * (n - 1)` and values
/// between ranks interpolate linearly. Returns NaN for an empty slice
/// (callers guard on non-empty input).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            if lo == hi {
                sorted[lo]
            } else {
                sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
