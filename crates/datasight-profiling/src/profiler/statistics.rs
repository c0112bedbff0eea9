//! Role-specific statistics computation.
//!
//! Second stage of the pipeline. Consumes the roles assigned by the
//! classifier and produces one [`ColumnProfile`] per column. All moment
//! arithmetic runs over plain `f64` vectors extracted once per column.

use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::config::ProfileConfig;
use crate::types::{ColumnProfile, ColumnRole, StatValue, ValueCount};
use crate::utils::{datetime_values, numeric_values_dense, quantile_sorted, string_values};

/// Computes the statistics block of a [`ColumnProfile`], dispatching on
/// the column's assigned role.
pub struct StatisticsComputer {
    config: ProfileConfig,
}

impl StatisticsComputer {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Build the full profile for one classified column.
    ///
    /// Identifier and Unknown columns get a count and nothing else; their
    /// missing-value accounting still lands on the profile struct.
    pub fn compute(&self, series: &Series, role: ColumnRole) -> ColumnProfile {
        let (stats, frequent_values) = match role {
            ColumnRole::Numeric => (self.numeric_stats(series), Vec::new()),
            ColumnRole::Categorical => self.categorical_stats(series),
            ColumnRole::Datetime => (self.datetime_stats(series), Vec::new()),
            ColumnRole::Identifier | ColumnRole::Unknown => (count_only_stats(series), Vec::new()),
        };

        ColumnProfile {
            name: series.name().to_string(),
            role,
            stats,
            frequent_values,
            missing_count: series.null_count(),
            total_count: series.len(),
        }
    }

    fn numeric_stats(&self, series: &Series) -> BTreeMap<String, StatValue> {
        let mut values = numeric_values_dense(series);
        let mut stats = BTreeMap::new();
        stats.insert("count".to_string(), StatValue::from(values.len()));
        stats.insert("missing_pct".to_string(), StatValue::from(missing_pct(series)));
        if values.is_empty() {
            return stats;
        }

        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let median = quantile_sorted(&values, 0.5);
        let q1 = quantile_sorted(&values, 0.25);
        let q3 = quantile_sorted(&values, 0.75);

        // Sample standard deviation (n - 1). A single observation or a
        // constant column floors std, skewness, and kurtosis at zero
        // instead of going undefined.
        let std = if values.len() > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let skewness = if std > 0.0 {
            values.iter().map(|v| ((v - mean) / std).powi(3)).sum::<f64>() / n
        } else {
            0.0
        };
        let kurtosis = if std > 0.0 {
            values.iter().map(|v| ((v - mean) / std).powi(4)).sum::<f64>() / n - 3.0
        } else {
            0.0
        };

        let iqr = q3 - q1;
        let lower = q1 - self.config.outlier_iqr_multiplier * iqr;
        let upper = q3 + self.config.outlier_iqr_multiplier * iqr;
        let outlier_count = values.iter().filter(|v| **v < lower || **v > upper).count();

        stats.insert("mean".to_string(), StatValue::from(mean));
        stats.insert("median".to_string(), StatValue::from(median));
        stats.insert("std".to_string(), StatValue::from(std));
        stats.insert("min".to_string(), StatValue::from(values[0]));
        stats.insert(
            "max".to_string(),
            StatValue::from(values[values.len() - 1]),
        );
        stats.insert("q1".to_string(), StatValue::from(q1));
        stats.insert("q3".to_string(), StatValue::from(q3));
        stats.insert("skewness".to_string(), StatValue::from(skewness));
        stats.insert("kurtosis".to_string(), StatValue::from(kurtosis));
        stats.insert("outlier_count".to_string(), StatValue::from(outlier_count));
        stats.insert(
            "outlier_pct".to_string(),
            StatValue::from(outlier_count as f64 / n * 100.0),
        );
        stats
    }

    fn categorical_stats(&self, series: &Series) -> (BTreeMap<String, StatValue>, Vec<ValueCount>) {
        let values = string_values(series);
        let mut stats = BTreeMap::new();
        stats.insert("count".to_string(), StatValue::from(values.len()));
        stats.insert("missing_pct".to_string(), StatValue::from(missing_pct(series)));
        if values.is_empty() {
            return (stats, Vec::new());
        }

        // Counting in encounter order keeps mode ties deterministic: the
        // stable sort below never reorders values with equal counts, so
        // the first value to reach the winning count is the mode.
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for value in &values {
            match index.get(value.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push((value.clone(), 1));
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let non_missing = values.len() as f64;
        let entropy = counts
            .iter()
            .map(|(_, c)| {
                let p = *c as f64 / non_missing;
                p * p.ln()
            })
            .fold(0.0, |acc, term| acc - term);

        stats.insert("distinct_count".to_string(), StatValue::from(counts.len()));
        stats.insert("mode".to_string(), StatValue::from(counts[0].0.clone()));
        stats.insert("entropy".to_string(), StatValue::from(entropy));

        let frequent_values = counts
            .iter()
            .take(self.config.top_values)
            .map(|(value, count)| ValueCount {
                value: value.clone(),
                count: *count,
                percentage: *count as f64 / non_missing * 100.0,
            })
            .collect();

        (stats, frequent_values)
    }

    fn datetime_stats(&self, series: &Series) -> BTreeMap<String, StatValue> {
        let mut values = datetime_values(series);
        let mut stats = BTreeMap::new();
        stats.insert("count".to_string(), StatValue::from(values.len()));
        stats.insert("missing_pct".to_string(), StatValue::from(missing_pct(series)));
        if values.is_empty() {
            return stats;
        }

        values.sort();
        let min = values[0];
        let max = values[values.len() - 1];
        stats.insert(
            "min".to_string(),
            StatValue::from(min.format("%Y-%m-%d %H:%M:%S").to_string()),
        );
        stats.insert(
            "max".to_string(),
            StatValue::from(max.format("%Y-%m-%d %H:%M:%S").to_string()),
        );
        stats.insert(
            "span_days".to_string(),
            StatValue::Int((max - min).num_days()),
        );

        // Granularity is the smallest gap between distinct timestamps,
        // bucketed. With fewer than two distinct values there is no gap
        // to measure and the key is omitted.
        let mut distinct = values;
        distinct.dedup();
        if distinct.len() >= 2 {
            let min_gap_days = distinct
                .windows(2)
                .map(|w| (w[1] - w[0]).num_days())
                .min()
                .unwrap_or(0);
            let granularity = if min_gap_days < 28 {
                "day"
            } else if min_gap_days < 365 {
                "month"
            } else {
                "year"
            };
            stats.insert("granularity".to_string(), StatValue::from(granularity));
        }
        stats
    }
}

fn count_only_stats(series: &Series) -> BTreeMap<String, StatValue> {
    let mut stats = BTreeMap::new();
    stats.insert(
        "count".to_string(),
        StatValue::from(series.len() - series.null_count()),
    );
    stats
}

fn missing_pct(series: &Series) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.null_count() as f64 / series.len() as f64 * 100.0
    }
}
