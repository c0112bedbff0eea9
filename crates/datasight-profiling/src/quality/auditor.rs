//! Data quality auditing.

use polars::prelude::*;

use crate::config::ProfileConfig;
use crate::error::Result;
use crate::types::QualityIssue;

/// Scans a dataset for structural quality defects.
///
/// Findings are recorded, never acted on: the auditor mutates nothing and
/// profiling continues no matter what it finds.
pub struct QualityAuditor {
    config: ProfileConfig,
}

impl QualityAuditor {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Audit a frame.
    ///
    /// Issues come back grouped: the duplicate-row finding first, then
    /// missing-value findings in column order, then constant-column
    /// findings in column order.
    pub fn audit(&self, df: &DataFrame) -> Result<Vec<QualityIssue>> {
        let mut issues = Vec::new();

        // A duplicate is any row identical to an earlier row across all
        // columns; the first occurrence is not counted.
        let deduped = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
        let duplicate_count = df.height() - deduped.height();
        if duplicate_count > 0 {
            issues.push(QualityIssue::DuplicateRows {
                count: duplicate_count,
                percentage: duplicate_count as f64 / df.height() as f64 * 100.0,
            });
        }

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            if series.is_empty() {
                continue;
            }
            let ratio = series.null_count() as f64 / series.len() as f64;
            if ratio > self.config.missing_report_threshold {
                issues.push(QualityIssue::MissingValues {
                    column: series.name().to_string(),
                    ratio,
                });
            }
        }

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            let non_missing = series.len() - series.null_count();
            // Exactly one distinct observed value. An all-missing column
            // is not constant; it has no observed value at all.
            if non_missing >= 1 && series.drop_nulls().n_unique().unwrap_or(0) == 1 {
                issues.push(QualityIssue::ConstantColumn {
                    column: series.name().to_string(),
                });
            }
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auditor() -> QualityAuditor {
        QualityAuditor::new(ProfileConfig::default())
    }

    // ==================== duplicate tests ====================

    #[test]
    fn test_duplicate_rows_counted_without_first_occurrence() {
        // Row (1, "a") appears three times: two duplicates.
        let df = df! {
            "x" => &[1i64, 1, 2, 1],
            "y" => &["a", "a", "b", "a"],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            QualityIssue::DuplicateRows {
                count: 2,
                percentage: 50.0,
            }
        );
    }

    #[test]
    fn test_rows_differing_in_one_column_are_not_duplicates() {
        let df = df! {
            "x" => &[1i64, 2, 1],
            "y" => &["a", "b", "c"],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert!(issues.is_empty());
    }

    // ==================== missing value tests ====================

    #[test]
    fn test_any_missing_value_is_reported_by_default() {
        let df = df! {
            "full" => &[Some(1i64), Some(2), Some(3), Some(4)],
            "holey" => &[Some(1i64), None, Some(3), Some(4)],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            QualityIssue::MissingValues {
                column: "holey".to_string(),
                ratio: 0.25,
            }
        );
    }

    #[test]
    fn test_missing_threshold_is_strict() {
        // "a" sits exactly at the 0.5 threshold and must not be reported;
        // "b" exceeds it. "k" keeps the rows distinct.
        let config = ProfileConfig::builder()
            .missing_report_threshold(0.5)
            .build()
            .unwrap();
        let df = df! {
            "k" => &[1i64, 2, 3, 4, 5, 6, 7, 8],
            "a" => &[Some(1i64), None, Some(2), None, Some(3), None, Some(4), None],
            "b" => &[Some(1i64), None, None, None, Some(2), None, None, None],
        }
        .unwrap();

        let issues = QualityAuditor::new(config).audit(&df).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            QualityIssue::MissingValues {
                column: "b".to_string(),
                ratio: 0.75,
            }
        );
    }

    #[test]
    fn test_missing_issues_follow_column_order() {
        let df = df! {
            "z" => &[Some(1i64), None],
            "a" => &[None, Some(2i64)],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert_eq!(issues[0].column(), Some("z"));
        assert_eq!(issues[1].column(), Some("a"));
    }

    // ==================== constant column tests ====================

    #[test]
    fn test_constant_column_detected() {
        let df = df! {
            "varied" => &[1i64, 2, 3, 4],
            "flat" => &[7i64, 7, 7, 7],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            QualityIssue::ConstantColumn {
                column: "flat".to_string(),
            }
        );
    }

    #[test]
    fn test_constant_with_missing_values_still_detected() {
        let df = df! {
            "varied" => &[Some(1i64), Some(2), Some(3)],
            "flat" => &[Some(7i64), None, Some(7)],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert!(issues.contains(&QualityIssue::ConstantColumn {
            column: "flat".to_string(),
        }));
    }

    #[test]
    fn test_all_missing_column_is_not_constant() {
        let df = df! {
            "varied" => &[Some(1i64), Some(2), Some(3)],
            "empty" => &[None::<i64>, None, None],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert!(
            !issues
                .iter()
                .any(|i| matches!(i, QualityIssue::ConstantColumn { .. }))
        );
        // It still shows up as a missing-value finding.
        assert!(issues.contains(&QualityIssue::MissingValues {
            column: "empty".to_string(),
            ratio: 1.0,
        }));
    }

    #[test]
    fn test_two_distinct_values_are_not_constant() {
        let df = df! {
            "k" => &[1i64, 2, 3, 4],
            "nearly" => &[7i64, 7, 7, 8],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert!(issues.is_empty());
    }

    // ==================== ordering tests ====================

    #[test]
    fn test_issue_groups_are_ordered() {
        // One of everything: the last row duplicates the second, "holey"
        // has gaps, and "flat" never varies.
        let df = df! {
            "flat" => &[Some(5i64), Some(5), Some(5), Some(5)],
            "holey" => &[Some(1i64), None, Some(2), None],
        }
        .unwrap();

        let issues = auditor().audit(&df).unwrap();
        assert_eq!(issues.len(), 3);
        assert!(matches!(
            issues[0],
            QualityIssue::DuplicateRows { count: 1, .. }
        ));
        assert!(matches!(issues[1], QualityIssue::MissingValues { .. }));
        assert!(matches!(issues[2], QualityIssue::ConstantColumn { .. }));
    }

    #[test]
    fn test_clean_dataset_yields_no_issues() {
        let df = df! {
            "x" => &[1i64, 2, 3, 4],
            "y" => &["a", "b", "c", "d"],
        }
        .unwrap();

        assert!(auditor().audit(&df).unwrap().is_empty());
    }
}
