//! Data quality auditing module.
//!
//! Scans datasets for structural defects (duplicate rows, missing
//! values, constant columns) and records each finding without acting
//! on it.

mod auditor;

pub use auditor::QualityAuditor;
