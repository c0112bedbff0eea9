//! Error types for the profiling engine.
//!
//! The engine has exactly one fatal condition — an empty dataset — plus the
//! wrapped failures of its building blocks (configuration validation, frame
//! access, JSON export). Every other anomaly a dataset can exhibit is
//! absorbed into the profile itself (an `Unknown` role, an omitted
//! correlation pair, a quality issue) rather than surfaced as an error.
//!
//! Errors are serializable so that embedding applications can forward them
//! to their own consumers as `{code, message}` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the profiling engine.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The dataset has zero rows or zero columns; nothing can be profiled.
    #[error("Empty dataset: {rows} rows x {columns} columns")]
    EmptyDataset { rows: usize, columns: usize },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProfileError {
    /// Get a stable error code for consumer handling.
    ///
    /// Downstream collaborators dispatch on these codes rather than on
    /// message text, which is free to change.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset { .. } => "EMPTY_DATASET",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

/// Errors serialize as a struct with `code` and `message` fields, making
/// them easy to render without matching on variants.
impl Serialize for ProfileError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfileError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
