//! Dataset profiling pipeline.
//!
//! Profiling runs as a fixed sequence of stages:
//! - Column classification (one role per column)
//! - Role-specific statistics
//! - Pairwise correlation over the numeric columns
//! - Quality auditing
//! - Profile aggregation
//!
//! Data flows strictly forward: each stage consumes the outputs of the
//! stages before it and no stage revisits an earlier decision.

mod classifier;
mod correlation;
mod statistics;

pub use classifier::ColumnClassifier;
pub use correlation::CorrelationAnalyzer;
pub use statistics::StatisticsComputer;

use polars::prelude::*;
use tracing::{debug, info};

use crate::config::ProfileConfig;
use crate::error::{ProfileError, Result};
use crate::quality::QualityAuditor;
use crate::types::{ColumnProfile, DatasetProfile};

/// Entry point of the profiling pipeline.
///
/// Owns the configuration and drives the stages in order. A profiler is
/// cheap to construct and carries no state between runs: profiling the
/// same frame twice yields value-equal profiles.
pub struct DatasetProfiler {
    config: ProfileConfig,
}

impl DatasetProfiler {
    /// Build a profiler with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProfileConfig::default())
    }

    pub fn with_config(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Profile a dataset.
    ///
    /// Fails only on an empty input (zero rows or zero columns), before
    /// any stage runs. Every other irregularity is absorbed into the
    /// profile: an unclassifiable column arrives with the Unknown role,
    /// an undefined correlation is omitted, a data defect becomes a
    /// quality finding.
    pub fn profile(&self, df: &DataFrame) -> Result<DatasetProfile> {
        if df.height() == 0 || df.width() == 0 {
            return Err(ProfileError::EmptyDataset {
                rows: df.height(),
                columns: df.width(),
            });
        }

        info!(
            "Profiling dataset: {} rows x {} columns",
            df.height(),
            df.width()
        );

        let roles = ColumnClassifier::new(self.config.clone()).classify_all(df);

        let computer = StatisticsComputer::new(self.config.clone());
        let columns: Vec<ColumnProfile> = df
            .get_columns()
            .iter()
            .zip(&roles)
            .map(|(column, role)| computer.compute(column.as_materialized_series(), *role))
            .collect();

        let correlations = CorrelationAnalyzer::new(self.config.clone()).analyze(df, &roles);
        debug!("Computed {} correlation pairs", correlations.len());

        let issues = QualityAuditor::new(self.config.clone()).audit(df)?;
        debug!("Recorded {} quality findings", issues.len());

        Ok(DatasetProfile {
            row_count: df.height(),
            column_count: df.width(),
            memory_bytes: df.estimated_size() as u64,
            column_names: df
                .get_column_names()
                .iter()
                .map(|n| n.to_string())
                .collect(),
            columns,
            correlations,
            issues,
        })
    }
}

impl Default for DatasetProfiler {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(DatasetProfiler: Send, Sync);
