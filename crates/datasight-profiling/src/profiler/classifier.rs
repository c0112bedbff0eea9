//! Column role classification.
//!
//! First stage of the pipeline. Each column is assigned exactly one
//! [`ColumnRole`] here; every later stage dispatches on that role and
//! never re-derives it.

use polars::prelude::*;
use tracing::warn;

use crate::config::ProfileConfig;
use crate::types::ColumnRole;
use crate::utils::{
    is_datetime_dtype, is_integer_text, is_numeric_dtype, is_string_dtype, is_supported_dtype,
    parse_datetime_value, parse_numeric_value,
};

/// Assigns a [`ColumnRole`] to each column of a dataset.
///
/// Classification is pure and total: it inspects values, never modifies
/// them, and cannot fail. A column that defeats every rule comes back as
/// [`ColumnRole::Unknown`] with a warning logged.
pub struct ColumnClassifier {
    config: ProfileConfig,
}

impl ColumnClassifier {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Classify every column of a frame, in column order.
    pub fn classify_all(&self, df: &DataFrame) -> Vec<ColumnRole> {
        df.get_columns()
            .iter()
            .map(|c| self.classify(c.as_materialized_series()))
            .collect()
    }

    /// Classify a single column.
    ///
    /// Rules apply in a fixed precedence and the first match wins:
    ///
    /// 1. Identifier, when the column name contains one of the configured
    ///    patterns (case-insensitive), or when the distinct ratio over
    ///    non-missing values exceeds the cardinality threshold and the
    ///    column is not a float column with repeated values.
    /// 2. Datetime, when every non-missing value parses under one of the
    ///    supported date formats (native date columns qualify directly).
    /// 3. Numeric, when every non-missing value parses as an integer or
    ///    float (native numeric columns qualify directly).
    /// 4. Categorical, when the distinct ratio falls below the
    ///    cardinality threshold.
    /// 5. Unknown otherwise.
    ///
    /// Columns with no observed values and columns of nested or opaque
    /// dtypes short-circuit to Unknown; a distinct ratio exactly at the
    /// threshold satisfies neither the identifier rule nor the
    /// categorical rule and also lands on Unknown.
    pub fn classify(&self, series: &Series) -> ColumnRole {
        let name = series.name().as_str();
        let non_missing = series.len() - series.null_count();

        if non_missing == 0 {
            warn!("Could not classify column '{}': all values missing", name);
            return ColumnRole::Unknown;
        }

        if self.name_matches_identifier(name) {
            return ColumnRole::Identifier;
        }

        let dtype = series.dtype();
        if !is_supported_dtype(dtype) {
            warn!(
                "Could not classify column '{}': unsupported dtype {}",
                name, dtype
            );
            return ColumnRole::Unknown;
        }

        let non_null = series.drop_nulls();
        let distinct = non_null.n_unique().unwrap_or(0);
        let distinct_ratio = distinct as f64 / non_missing as f64;

        // Float columns with repeated values are measurements, not keys,
        // no matter how many distinct values they carry.
        let repeating_float = distinct < non_missing && is_float_valued(&non_null);
        if distinct_ratio > self.config.cardinality_threshold && !repeating_float {
            return ColumnRole::Identifier;
        }

        if is_datetime_dtype(dtype)
            || (is_string_dtype(dtype)
                && all_text_values(&non_null, |v| parse_datetime_value(v).is_some()))
        {
            return ColumnRole::Datetime;
        }

        if is_numeric_dtype(dtype)
            || (is_string_dtype(dtype)
                && all_text_values(&non_null, |v| parse_numeric_value(v).is_some()))
        {
            return ColumnRole::Numeric;
        }

        if distinct_ratio < self.config.cardinality_threshold {
            return ColumnRole::Categorical;
        }

        warn!("Could not classify column '{}': no rule matched", name);
        ColumnRole::Unknown
    }

    fn name_matches_identifier(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.config
            .identifier_patterns
            .iter()
            .any(|p| lower.contains(&p.to_lowercase()))
    }
}

/// Whether a column holds floating-point measurements: a native float
/// dtype, or text values that all parse as numbers but not all as
/// integer literals.
fn is_float_valued(series: &Series) -> bool {
    match series.dtype() {
        DataType::Float32 | DataType::Float64 => true,
        dtype if is_string_dtype(dtype) => {
            all_text_values(series, |v| parse_numeric_value(v).is_some())
                && !all_text_values(series, is_integer_text)
        }
        _ => false,
    }
}

/// Whether every non-missing value, rendered as text, satisfies the
/// predicate. Every value is checked; no sampling.
fn all_text_values(series: &Series, predicate: impl Fn(&str) -> bool) -> bool {
    series
        .cast(&DataType::String)
        .ok()
        .and_then(|s| {
            s.str()
                .ok()
                .map(|ca| ca.into_iter().flatten().all(|v| predicate(v)))
        })
        .unwrap_or(false)
}
