//! Pairwise correlation analysis.
//!
//! Third stage of the pipeline. Runs over the columns the classifier
//! marked numeric and nothing else; identifiers stay out by role, not by
//! name. Each numeric column is materialized once, then every unordered
//! pair is measured.

use polars::prelude::*;
use tracing::debug;

use crate::config::ProfileConfig;
use crate::types::{ColumnRole, CorrelationPair};
use crate::utils::numeric_values;

/// Computes Pearson coefficients for every unordered pair of numeric
/// columns.
pub struct CorrelationAnalyzer {
    config: ProfileConfig,
}

impl CorrelationAnalyzer {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Measure every unordered pair of numeric columns.
    ///
    /// Rows where either side is missing are dropped per pair (pairwise
    /// deletion). A pair with fewer than two surviving rows, or with zero
    /// variance on either side of the surviving rows, has no defined
    /// coefficient and is omitted. Every defined pair is returned, weak
    /// or strong; the result is ordered by descending |coefficient| with
    /// name order breaking exact ties.
    pub fn analyze(&self, df: &DataFrame, roles: &[ColumnRole]) -> Vec<CorrelationPair> {
        let columns: Vec<(String, Vec<Option<f64>>)> = df
            .get_columns()
            .iter()
            .zip(roles)
            .filter(|(_, role)| **role == ColumnRole::Numeric)
            .map(|(column, _)| {
                let series = column.as_materialized_series();
                (series.name().to_string(), numeric_values(series))
            })
            .collect();

        let mut pairs = Vec::new();
        for i in 0..columns.len() {
            for j in (i + 1)..columns.len() {
                let (name_a, values_a) = &columns[i];
                let (name_b, values_b) = &columns[j];
                match pearson(values_a, values_b) {
                    Some(r) => pairs.push(CorrelationPair::new(
                        name_a.clone(),
                        name_b.clone(),
                        r,
                        self.config.correlation_threshold,
                    )),
                    None => debug!(
                        "Skipping correlation for '{}' and '{}': undefined on paired rows",
                        name_a, name_b
                    ),
                }
            }
        }

        pairs.sort_by(|a, b| {
            b.coefficient
                .abs()
                .partial_cmp(&a.coefficient.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    (a.column_a.as_str(), a.column_b.as_str())
                        .cmp(&(b.column_a.as_str(), b.column_b.as_str()))
                })
        });
        pairs
    }
}

/// Pearson coefficient over the rows where both columns carry a value.
///
/// Returns `None` when fewer than two paired observations exist or when
/// either side has zero variance on those observations. The result is
/// clamped to [-1, 1] so rounding noise can never leak out of range.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let paired: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(&x, &y)| x.zip(y))
        .collect();
    if paired.len() < 2 {
        return None;
    }

    let n = paired.len() as f64;
    let mean_x = paired.iter().map(|(x, _)| *x).sum::<f64>() / n;
    let mean_y = paired.iter().map(|(_, y)| *y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &paired {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}
