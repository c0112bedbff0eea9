//! Dataset Profiling Library
//!
//! A deterministic statistical profiling engine for tabular datasets, built with Rust and Polars.
//!
//! # Overview
//!
//! This library inspects a [`polars`] `DataFrame` and produces a structured profile covering:
//!
//! - **Role Classification**: Every column is assigned a semantic role (numeric, categorical,
//!   datetime, identifier, or unknown) from its name, dtype, and value distribution
//! - **Descriptive Statistics**: Per-column statistics tailored to the role, from quartiles and
//!   distribution shape for measurements to mode and entropy for categories
//! - **Correlation Analysis**: Pairwise Pearson coefficients across numeric columns with
//!   pairwise deletion of missing values
//! - **Quality Findings**: Duplicate rows, missing-value hotspots, and constant columns
//! - **Serializable Output**: The complete profile serializes to pretty-printed JSON
//!
//! The same input always produces the same profile. No sampling, no clocks, no randomness.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datasight_profiling::{DatasetProfiler, ProfileConfig};
//! use polars::prelude::*;
//!
//! // Load data
//! let df = CsvReader::from_path("sales.csv")?.finish()?;
//!
//! // Option 1: Profile with defaults
//! let profile = DatasetProfiler::new().profile(&df)?;
//! println!("{}", profile.to_json()?);
//!
//! // Option 2: Tune the thresholds first
//! let config = ProfileConfig::builder()
//!     .cardinality_threshold(0.9)
//!     .correlation_threshold(0.8)
//!     .top_values(5)
//!     .build()?;
//!
//! let profile = DatasetProfiler::with_config(config).profile(&df)?;
//!
//! for pair in profile.strong_correlations() {
//!     println!("{} ~ {}: {:.2}", pair.column_a, pair.column_b, pair.coefficient);
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`ProfileConfig`] to customize profiling behavior:
//!
//! ```rust,ignore
//! use datasight_profiling::ProfileConfig;
//!
//! let config = ProfileConfig::builder()
//!     .identifier_patterns(vec!["id".into(), "sku".into()])
//!     .cardinality_threshold(0.95)     // Distinct ratio above which a column is an identifier
//!     .correlation_threshold(0.7)      // |r| above which a pair is flagged as strong
//!     .top_values(10)                  // Frequent values kept per categorical column
//!     .outlier_iqr_multiplier(1.5)     // Fence width for the IQR outlier rule
//!     .missing_report_threshold(0.0)   // Missing ratio above which a column is reported
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! Profiling an empty frame (zero rows or zero columns) fails with
//! [`ProfileError::EmptyDataset`] rather than producing a degenerate profile. All fallible
//! operations return [`ProfileResult`].

// Core modules
pub mod config;
pub mod error;
pub mod profiler;
pub mod quality;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ProfileConfig, ProfileConfigBuilder};
pub use error::{ProfileError, Result as ProfileResult};
pub use profiler::{ColumnClassifier, CorrelationAnalyzer, DatasetProfiler, StatisticsComputer};
pub use quality::QualityAuditor;
pub use types::{
    ColumnProfile, ColumnRole, CorrelationDirection, CorrelationPair, DatasetProfile, QualityIssue,
    StatValue, ValueCount,
};
pub use utils::{
    is_datetime_dtype, is_numeric_dtype, is_string_dtype, is_supported_dtype,
    parse_datetime_value, parse_numeric_value,
};
