// refmart-core/src/domain/quality/rules.rs
//
// The rule battery is fixed and closed: a tagged enum, each variant a pure
// read-only reducer over the fact view. Rules never mutate the facts and are
// independent of each other; the engine decides scheduling and merge order.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::facts::FactView;
use crate::domain::quality::issue::{Category, QualityIssue, Severity};
use crate::domain::quality::volatility::YoyCheck;
use crate::domain::quality::QualityThresholds;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("integer overflow while summing offense categories for '{county}' ({year})")]
    OffenseSumOverflow { county: String, year: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    NonNullTotals,
    UniqueCountyYear,
    OffenseSumConsistency,
    YouthBound,
    YoyVolatility,
}

/// Declared evaluation and report order. The engine merges results back into
/// this order regardless of how the rules were scheduled.
pub const RULE_ORDER: [RuleKind; 5] = [
    RuleKind::NonNullTotals,
    RuleKind::UniqueCountyYear,
    RuleKind::OffenseSumConsistency,
    RuleKind::YouthBound,
    RuleKind::YoyVolatility,
];

impl RuleKind {
    /// Stable rule identifier as it appears in the report.
    pub fn id(&self) -> &'static str {
        match self {
            RuleKind::NonNullTotals => "Total_Referrals must not be NULL",
            RuleKind::UniqueCountyYear => "County + Year must be unique",
            RuleKind::OffenseSumConsistency => "Sum of Offenses == Total Referrals",
            RuleKind::YouthBound => "Unique Youth <= Total Referrals",
            RuleKind::YoyVolatility => "YoY Change > 50%",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            RuleKind::NonNullTotals => Category::Completeness,
            RuleKind::UniqueCountyYear => Category::Uniqueness,
            RuleKind::OffenseSumConsistency | RuleKind::YouthBound => Category::Logic,
            RuleKind::YoyVolatility => Category::Outlier,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RuleKind::NonNullTotals | RuleKind::UniqueCountyYear => Severity::Critical,
            RuleKind::OffenseSumConsistency => Severity::Medium,
            RuleKind::YouthBound => Severity::High,
            RuleKind::YoyVolatility => Severity::Low,
        }
    }

    /// Evaluates the rule over the whole view. `Ok(None)` means the rule did
    /// not trigger; a triggered rule aggregates every matched row into one
    /// issue.
    pub fn evaluate(
        &self,
        view: &[FactView],
        thresholds: &QualityThresholds,
    ) -> Result<Option<QualityIssue>, RuleError> {
        let (failed_rows, details) = match self {
            RuleKind::NonNullTotals => {
                let count = view
                    .iter()
                    .filter(|row| row.measures.total_referrals.is_none())
                    .count() as u64;
                (count, format!("{count} rows have missing referral counts."))
            }

            RuleKind::UniqueCountyYear => {
                let mut seen: HashMap<(u32, u32), u64> = HashMap::new();
                for row in view {
                    *seen.entry((row.county_id, row.year_id)).or_insert(0) += 1;
                }
                // Every occurrence beyond the first of each pair counts.
                let count = view.len() as u64 - seen.len() as u64;
                (
                    count,
                    format!("Found {count} duplicate records for County/Year combinations."),
                )
            }

            RuleKind::OffenseSumConsistency => {
                let mut count = 0u64;
                for row in view {
                    // Rows with a missing total belong to the completeness rule.
                    let Some(total) = row.measures.total_referrals else {
                        continue;
                    };
                    match offense_sum(row)? {
                        Some(sum) if sum == total => {}
                        // A missing component makes the row unreconcilable.
                        _ => count += 1,
                    }
                }
                (
                    count,
                    format!(
                        "{count} rows have mismatch between offense sum and Total Referrals. (Potential data entry error)"
                    ),
                )
            }

            RuleKind::YouthBound => {
                let count = view
                    .iter()
                    .filter(|row| {
                        matches!(
                            (row.measures.unique_youth, row.measures.total_referrals),
                            (Some(youth), Some(total)) if youth > total
                        )
                    })
                    .count() as u64;
                (
                    count,
                    format!("{count} rows have more Unique Youth than Referrals (impossible)."),
                )
            }

            RuleKind::YoyVolatility => {
                let count = YoyCheck::count_outliers(
                    view,
                    thresholds.volatility_threshold,
                    thresholds.volatility_floor,
                );
                (
                    count,
                    format!(
                        "{count} county-years show >{:.0}% change in volume vs previous year.",
                        thresholds.volatility_threshold * 100.0
                    ),
                )
            }
        };

        if failed_rows == 0 {
            return Ok(None);
        }

        Ok(Some(QualityIssue {
            category: self.category(),
            rule: self.id(),
            failed_rows,
            severity: self.severity(),
            details,
        }))
    }
}

/// Checked sum of the six offense categories. `None` when a component is
/// absent; errors when the addition overflows.
fn offense_sum(row: &FactView) -> Result<Option<i64>, RuleError> {
    let mut sum = 0i64;
    for component in row.measures.offense_categories() {
        match component {
            Some(value) => {
                sum = sum
                    .checked_add(value)
                    .ok_or_else(|| RuleError::OffenseSumOverflow {
                        county: row.county.clone(),
                        year: row.year,
                    })?;
            }
            None => return Ok(None),
        }
    }
    Ok(Some(sum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::referral::Measures;

    fn thresholds() -> QualityThresholds {
        QualityThresholds::default()
    }

    fn row(county_id: u32, year: i32, offenses: [i64; 6], total: Option<i64>) -> FactView {
        FactView {
            county_id,
            year_id: (year - 2018) as u32,
            county: format!("C{county_id}"),
            region: "Unknown".to_string(),
            year,
            measures: Measures {
                juvenile_population: Some(1000),
                violent_felony: Some(offenses[0]),
                other_felony: Some(offenses[1]),
                misdemeanor: Some(offenses[2]),
                vop: Some(offenses[3]),
                status_offense: Some(offenses[4]),
                cins: Some(offenses[5]),
                total_referrals: total,
                referral_rate: Some(1.0),
                unique_youth: total,
            },
        }
    }

    #[test]
    fn test_non_null_totals_counts_missing_rows() {
        let view = vec![
            row(1, 2020, [1; 6], Some(6)),
            row(1, 2021, [1; 6], None),
            row(2, 2020, [1; 6], None),
        ];
        let issue = RuleKind::NonNullTotals
            .evaluate(&view, &thresholds())
            .unwrap()
            .unwrap();
        assert_eq!(issue.failed_rows, 2);
        assert_eq!(issue.category, Category::Completeness);
        assert_eq!(issue.severity, Severity::Critical);
    }

    #[test]
    fn test_clean_view_triggers_nothing() {
        let view = vec![row(1, 2020, [1; 6], Some(6)), row(2, 2020, [2; 6], Some(12))];
        for rule in RULE_ORDER {
            assert!(
                rule.evaluate(&view, &thresholds()).unwrap().is_none(),
                "rule '{}' should not trigger on clean data",
                rule.id()
            );
        }
    }

    #[test]
    fn test_duplicate_pairs_counted_beyond_first_occurrence() {
        let view = vec![
            row(1, 2020, [1; 6], Some(6)),
            row(1, 2020, [1; 6], Some(6)),
            row(1, 2020, [1; 6], Some(6)),
            row(2, 2020, [1; 6], Some(6)),
        ];
        let issue = RuleKind::UniqueCountyYear
            .evaluate(&view, &thresholds())
            .unwrap()
            .unwrap();
        // 3 occurrences of the same pair -> 2 duplicates beyond the first.
        assert_eq!(issue.failed_rows, 2);
        assert_eq!(issue.severity, Severity::Critical);
    }

    #[test]
    fn test_offense_sum_mismatch_count_is_exact() {
        let view = vec![
            row(1, 2020, [10, 0, 0, 0, 0, 0], Some(10)),
            row(1, 2021, [10, 0, 0, 0, 0, 0], Some(11)),
            row(2, 2020, [5, 5, 0, 0, 0, 0], Some(9)),
        ];
        let issue = RuleKind::OffenseSumConsistency
            .evaluate(&view, &thresholds())
            .unwrap()
            .unwrap();
        assert_eq!(issue.failed_rows, 2);
        assert_eq!(issue.category, Category::Logic);
        assert_eq!(issue.severity, Severity::Medium);
    }

    #[test]
    fn test_offense_sum_skips_rows_owned_by_completeness() {
        // Missing total: completeness territory, not a sum mismatch.
        let view = vec![row(1, 2020, [1; 6], None)];
        assert!(
            RuleKind::OffenseSumConsistency
                .evaluate(&view, &thresholds())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_offense_sum_missing_component_is_a_mismatch() {
        let mut broken = row(1, 2020, [1; 6], Some(6));
        broken.measures.vop = None;
        let issue = RuleKind::OffenseSumConsistency
            .evaluate(&[broken], &thresholds())
            .unwrap()
            .unwrap();
        assert_eq!(issue.failed_rows, 1);
    }

    #[test]
    fn test_offense_sum_overflow_is_a_rule_error() {
        let overflow = row(1, 2020, [i64::MAX, 1, 0, 0, 0, 0], Some(1));
        let result = RuleKind::OffenseSumConsistency.evaluate(&[overflow], &thresholds());
        assert!(matches!(
            result,
            Err(RuleError::OffenseSumOverflow { year: 2020, .. })
        ));
    }

    #[test]
    fn test_youth_bound_violations() {
        let mut bad = row(1, 2020, [1; 6], Some(6));
        bad.measures.unique_youth = Some(7);
        let ok = row(2, 2020, [1; 6], Some(6));
        let issue = RuleKind::YouthBound
            .evaluate(&[bad, ok], &thresholds())
            .unwrap()
            .unwrap();
        assert_eq!(issue.failed_rows, 1);
        assert_eq!(issue.severity, Severity::High);
    }

    #[test]
    fn test_volatility_uses_configured_thresholds() {
        let view = vec![
            row(1, 2020, [100, 0, 0, 0, 0, 0], Some(100)),
            row(1, 2021, [160, 0, 0, 0, 0, 0], Some(160)),
        ];
        // Sum checks pass; only the outlier rule triggers.
        let issue = RuleKind::YoyVolatility
            .evaluate(&view, &thresholds())
            .unwrap()
            .unwrap();
        assert_eq!(issue.failed_rows, 1);
        assert_eq!(issue.category, Category::Outlier);
        assert_eq!(issue.severity, Severity::Low);

        // A looser threshold stands down.
        let loose = QualityThresholds {
            volatility_threshold: 0.7,
            ..QualityThresholds::default()
        };
        assert!(RuleKind::YoyVolatility.evaluate(&view, &loose).unwrap().is_none());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let view = vec![
            row(1, 2020, [1; 6], None),
            row(1, 2020, [1; 6], Some(7)),
            row(2, 2020, [100, 0, 0, 0, 0, 0], Some(100)),
            row(2, 2021, [160, 0, 0, 0, 0, 0], Some(160)),
        ];
        let first: Vec<_> = RULE_ORDER
            .iter()
            .map(|rule| rule.evaluate(&view, &thresholds()).unwrap())
            .collect();
        let second: Vec<_> = RULE_ORDER
            .iter()
            .map(|rule| rule.evaluate(&view, &thresholds()).unwrap())
            .collect();
        assert_eq!(first, second);
    }
}
