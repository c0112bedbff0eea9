//! Core data model of the profiling engine.
//!
//! Everything here is a plain value: constructed once by the pipeline,
//! serialized for downstream consumers, never mutated afterwards. The
//! aggregate root is [`DatasetProfile`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;

// ============================================================================
// Column roles
// ============================================================================

/// Semantic role assigned to a column, decided exactly once by the
/// classifier. Every later stage dispatches on this tag instead of
/// re-inspecting raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// All non-missing values are integers or floats.
    Numeric,
    /// A bounded set of repeating values.
    Categorical,
    /// All non-missing values are dates or timestamps.
    Datetime,
    /// A key-like column (by name pattern or near-unique values).
    Identifier,
    /// Nothing could be established; excluded from statistics and
    /// correlation but still carried in the profile.
    Unknown,
}

impl ColumnRole {
    /// Stable lowercase name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Datetime => "datetime",
            Self::Identifier => "identifier",
            Self::Unknown => "unknown",
        }
    }

    /// Whether columns of this role receive distributional statistics.
    /// Identifier and Unknown columns only report counts.
    pub fn has_distribution(&self) -> bool {
        matches!(self, Self::Numeric | Self::Categorical | Self::Datetime)
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Statistics values
// ============================================================================

/// A single entry in a column's statistics mapping: integer, float, or text.
///
/// Serializes untagged, so a stats map renders as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    /// Numeric view of the value; integers widen to floats, text is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for StatValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for StatValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

// ============================================================================
// Per-column profile
// ============================================================================

/// One row of a categorical frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    /// Share of the non-missing values, in percent.
    pub percentage: f64,
}

/// Profile of a single column: its role, its role-specific statistics
/// (key-ordered), and its missing-value accounting.
///
/// The count invariant is structural: only `missing_count` and
/// `total_count` are stored, and [`ColumnProfile::non_missing_count`] is
/// derived, so the three can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub role: ColumnRole,
    /// Role-specific statistics. `BTreeMap` keeps serialization key-ordered.
    pub stats: BTreeMap<String, StatValue>,
    /// Top-N value frequencies; populated for categorical columns only.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub frequent_values: Vec<ValueCount>,
    pub missing_count: usize,
    pub total_count: usize,
}

impl ColumnProfile {
    pub fn non_missing_count(&self) -> usize {
        self.total_count - self.missing_count
    }

    /// Missing share as a fraction in [0, 1]; 0 for a zero-length column.
    pub fn missing_ratio(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.missing_count as f64 / self.total_count as f64
        }
    }

    /// Look up a single statistic by key.
    pub fn stat(&self, key: &str) -> Option<&StatValue> {
        self.stats.get(key)
    }
}

// ============================================================================
// Correlation pairs
// ============================================================================

/// Sign of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl CorrelationDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

/// One unordered pair of numeric columns with its Pearson coefficient.
///
/// The pair is canonicalized at construction (names in lexicographic
/// order), so `(a, b)` and `(b, a)` produce equal values and an unordered
/// pair can never appear twice in a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub column_a: String,
    pub column_b: String,
    /// Pearson coefficient, always within [-1, 1].
    pub coefficient: f64,
    /// Whether |coefficient| exceeds the configured threshold.
    pub is_strong: bool,
    pub direction: CorrelationDirection,
}

impl CorrelationPair {
    /// Build a canonicalized pair, deriving `is_strong` and `direction`
    /// from the coefficient and the configured threshold.
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        coefficient: f64,
        strong_threshold: f64,
    ) -> Self {
        let (mut a, mut b) = (first.into(), second.into());
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        let direction = if coefficient > 0.0 {
            CorrelationDirection::Positive
        } else {
            CorrelationDirection::Negative
        };
        Self {
            column_a: a,
            column_b: b,
            coefficient,
            is_strong: coefficient.abs() > strong_threshold,
            direction,
        }
    }

    /// Whether the pair touches the named column.
    pub fn involves(&self, column: &str) -> bool {
        self.column_a == column || self.column_b == column
    }
}

// ============================================================================
// Quality issues
// ============================================================================

/// A recorded, non-fatal data defect. Each variant carries everything a
/// consumer needs to render it without recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityIssue {
    /// Rows that are exact duplicates of an earlier row across all columns.
    /// The first occurrence is not counted.
    DuplicateRows { count: usize, percentage: f64 },
    /// A column whose missing ratio exceeds the reporting threshold.
    /// The ratio is a fraction in [0, 1].
    MissingValues { column: String, ratio: f64 },
    /// A column with exactly one distinct non-missing value.
    ConstantColumn { column: String },
}

impl QualityIssue {
    /// Stable kind string, identical to the serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateRows { .. } => "duplicate_rows",
            Self::MissingValues { .. } => "missing_values",
            Self::ConstantColumn { .. } => "constant_column",
        }
    }

    /// The affected column, for per-column issues.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::DuplicateRows { .. } => None,
            Self::MissingValues { column, .. } | Self::ConstantColumn { column } => Some(column),
        }
    }
}

// ============================================================================
// Dataset profile (aggregate root)
// ============================================================================

/// The single immutable output artifact of a profiling run.
///
/// Downstream consumers (chart planning, narrative generation, report
/// assembly) read it as ground truth and never recompute its numbers.
/// Contains no timestamps or other run-varying fields: profiling the same
/// dataset with the same configuration twice yields value-equal profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
    /// Estimated in-memory footprint: the sum of per-column value sizes.
    pub memory_bytes: u64,
    /// Column names in dataset order.
    pub column_names: Vec<String>,
    /// Per-column profiles, in dataset order.
    pub columns: Vec<ColumnProfile>,
    /// Defined correlation pairs, ordered by descending |coefficient|.
    pub correlations: Vec<CorrelationPair>,
    /// Quality findings: duplicates first, then per-column issues in
    /// column order.
    pub issues: Vec<QualityIssue>,
}

impl DatasetProfile {
    /// Look up a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns carrying the given role, in dataset order.
    pub fn columns_with_role(&self, role: ColumnRole) -> Vec<&ColumnProfile> {
        self.columns.iter().filter(|c| c.role == role).collect()
    }

    /// The correlation pairs flagged as strong, preserving profile order.
    pub fn strong_correlations(&self) -> Vec<&CorrelationPair> {
        self.correlations.iter().filter(|p| p.is_strong).collect()
    }

    /// Render the profile as pretty JSON for downstream consumers.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

static_assertions::assert_impl_all!(DatasetProfile: Send, Sync);
static_assertions::assert_impl_all!(ColumnProfile: Send, Sync);

// ============================================================================
// Tests
// ============================================================================
