//! Configuration types for the profiling engine.
//!
//! All thresholds and patterns the pipeline stages consult live here, as one
//! immutable value threaded explicitly into every stage call. Nothing is read
//! from ambient or global state, so two runs with equal configurations are
//! guaranteed to see equal inputs.

use serde::{Deserialize, Serialize};

/// Configuration for a profiling run.
///
/// Use [`ProfileConfig::builder()`] to create a new configuration with a
/// fluent API, or [`ProfileConfig::default()`] for the standard thresholds.
///
/// # Example
///
/// ```rust,ignore
/// use datasight_profiling::ProfileConfig;
///
/// let config = ProfileConfig::builder()
///     .correlation_threshold(0.8)
///     .top_values(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Name fragments that mark a column as an identifier.
    /// Matched case-insensitively as substrings of the column name.
    /// Default: `["id", "index", "key", "uuid", "guid"]`
    pub identifier_patterns: Vec<String>,

    /// Distinct-to-non-missing ratio above which a column is treated as an
    /// identifier (0.0 - 1.0).
    /// Default: 0.95
    pub cardinality_threshold: f64,

    /// Absolute correlation coefficient above which a pair is flagged as
    /// strong (0.0 - 1.0).
    /// Default: 0.7
    pub correlation_threshold: f64,

    /// Number of entries in the categorical value frequency table.
    /// Default: 10
    pub top_values: usize,

    /// IQR multiplier for the numeric outlier fences
    /// (Q1 - m*IQR, Q3 + m*IQR).
    /// Default: 1.5
    pub outlier_iqr_multiplier: f64,

    /// Missing-value ratio above which a `MissingValues` issue is reported
    /// (0.0 - 1.0). The default reports any missingness at all; severity
    /// grading is left to the consumer, which receives the exact ratio.
    /// Default: 0.0
    pub missing_report_threshold: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            identifier_patterns: ["id", "index", "key", "uuid", "guid"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cardinality_threshold: 0.95,
            correlation_threshold: 0.7,
            top_values: 10,
            outlier_iqr_multiplier: 1.5,
            missing_report_threshold: 0.0,
        }
    }
}

impl ProfileConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfileConfigBuilder {
        ProfileConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.cardinality_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "cardinality_threshold".to_string(),
                value: self.cardinality_threshold,
            });
        }

        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "correlation_threshold".to_string(),
                value: self.correlation_threshold,
            });
        }

        if !(0.0..=1.0).contains(&self.missing_report_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "missing_report_threshold".to_string(),
                value: self.missing_report_threshold,
            });
        }

        if !self.outlier_iqr_multiplier.is_finite() || self.outlier_iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidOutlierMultiplier(
                self.outlier_iqr_multiplier,
            ));
        }

        if self.top_values == 0 {
            return Err(ConfigValidationError::InvalidTopValues(self.top_values));
        }

        // An empty pattern is a substring of every name and would turn the
        // whole dataset into identifiers.
        if self.identifier_patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigValidationError::EmptyIdentifierPattern);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid outlier IQR multiplier: {0} (must be positive and finite)")]
    InvalidOutlierMultiplier(f64),

    #[error("Invalid frequency table size: {0} (must be at least 1)")]
    InvalidTopValues(usize),

    #[error("Identifier patterns must not contain empty strings")]
    EmptyIdentifierPattern,
}

/// Builder for [`ProfileConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfileConfigBuilder {
    identifier_patterns: Option<Vec<String>>,
    cardinality_threshold: Option<f64>,
    correlation_threshold: Option<f64>,
    top_values: Option<usize>,
    outlier_iqr_multiplier: Option<f64>,
    missing_report_threshold: Option<f64>,
}

impl ProfileConfigBuilder {
    /// Replace the identifier name-pattern list.
    ///
    /// Patterns are matched case-insensitively as substrings of the column
    /// name. An empty list disables name-based identifier detection (the
    /// cardinality rule still applies).
    pub fn identifier_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the distinct-ratio threshold for identifier detection.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.95 = 95% distinct)
    pub fn cardinality_threshold(mut self, threshold: f64) -> Self {
        self.cardinality_threshold = Some(threshold);
        self
    }

    /// Set the absolute-coefficient threshold for strong correlations.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.7)
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = Some(threshold);
        self
    }

    /// Set the size of the categorical value frequency table.
    pub fn top_values(mut self, n: usize) -> Self {
        self.top_values = Some(n);
        self
    }

    /// Set the IQR multiplier for outlier fences.
    pub fn outlier_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.outlier_iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the missing-value ratio above which an issue is reported.
    pub fn missing_report_threshold(mut self, threshold: f64) -> Self {
        self.missing_report_threshold = Some(threshold);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfileConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfileConfig, ConfigValidationError> {
        let defaults = ProfileConfig::default();
        let config = ProfileConfig {
            identifier_patterns: self
                .identifier_patterns
                .unwrap_or(defaults.identifier_patterns),
            cardinality_threshold: self
                .cardinality_threshold
                .unwrap_or(defaults.cardinality_threshold),
            correlation_threshold: self
                .correlation_threshold
                .unwrap_or(defaults.correlation_threshold),
            top_values: self.top_values.unwrap_or(defaults.top_values),
            outlier_iqr_multiplier: self
                .outlier_iqr_multiplier
                .unwrap_or(defaults.outlier_iqr_multiplier),
            missing_report_threshold: self
                .missing_report_threshold
                .unwrap_or(defaults.missing_report_threshold),
        };

        config.validate()?;
        Ok(config)
    }
}

static_assertions::assert_impl_all!(ProfileConfig: Send, Sync);
