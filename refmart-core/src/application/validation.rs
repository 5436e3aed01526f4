// refmart-core/src/application/validation.rs

use futures::StreamExt;
use tracing::error;

use crate::domain::facts::FactView;
use crate::domain::quality::{QualityIssue, QualityThresholds, RULE_ORDER};

/// Runs the fixed rule battery over the joined fact view.
///
/// Rules are independent read-only reducers, so they are evaluated
/// concurrently; results are merged back in the declared rule order, which
/// keeps the issue list byte-identical across repeated runs over the same
/// facts. A rule that fails internally is a tooling defect, not a data
/// finding: it is logged and excluded while the remaining rules still
/// contribute (isolate-and-continue).
pub async fn run_audit(view: &[FactView], thresholds: &QualityThresholds) -> Vec<QualityIssue> {
    let evaluations = RULE_ORDER
        .iter()
        .enumerate()
        .map(|(position, rule)| async move { (position, rule, rule.evaluate(view, thresholds)) });

    let mut results: Vec<_> = futures::stream::iter(evaluations)
        .buffer_unordered(RULE_ORDER.len())
        .collect()
        .await;
    results.sort_by_key(|(position, _, _)| *position);

    let mut issues = Vec::new();
    for (_, rule, outcome) in results {
        match outcome {
            Ok(Some(issue)) => issues.push(issue),
            Ok(None) => {}
            Err(e) => error!(rule = rule.id(), "Rule skipped after internal failure: {e}"),
        }
    }
    issues
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::{Category, Severity};
    use crate::domain::referral::Measures;

    fn view_row(county_id: u32, year: i32, offenses: [i64; 6], total: Option<i64>) -> FactView {
        FactView {
            county_id,
            year_id: (year - 2019) as u32,
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

    /// End-to-end audit scenario: 2 counties x 2 years, one 60% jump on a
    /// prior above the floor. Exactly one Outlier issue, nothing else.
    #[tokio::test]
    async fn test_audit_flags_only_the_outlier() {
        let view = vec![
            view_row(1, 2020, [50, 0, 0, 0, 0, 0], Some(50)),
            view_row(1, 2021, [80, 0, 0, 0, 0, 0], Some(80)),
            view_row(2, 2020, [12, 0, 0, 0, 0, 0], Some(12)),
            view_row(2, 2021, [12, 0, 0, 0, 0, 0], Some(12)),
        ];

        let issues = run_audit(&view, &QualityThresholds::default()).await;

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, Category::Outlier);
        assert_eq!(issues[0].severity, Severity::Low);
        assert_eq!(issues[0].failed_rows, 1);
    }

    #[tokio::test]
    async fn test_audit_preserves_declared_rule_order() {
        // Trip completeness, uniqueness and the youth bound at once.
        let mut youth_violation = view_row(2, 2020, [1; 6], Some(6));
        youth_violation.measures.unique_youth = Some(9);
        let view = vec![
            view_row(1, 2020, [1; 6], None),
            view_row(1, 2020, [1; 6], None),
            youth_violation,
        ];

        let issues = run_audit(&view, &QualityThresholds::default()).await;

        let categories: Vec<Category> = issues.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![Category::Completeness, Category::Uniqueness, Category::Logic]
        );
    }

    #[tokio::test]
    async fn test_audit_is_idempotent() {
        let view = vec![
            view_row(1, 2020, [100, 0, 0, 0, 0, 0], Some(100)),
            view_row(1, 2021, [160, 0, 0, 0, 0, 0], Some(160)),
            view_row(2, 2020, [1; 6], None),
        ];
        let thresholds = QualityThresholds::default();

        let first = run_audit(&view, &thresholds).await;
        let second = run_audit(&view, &thresholds).await;
        assert_eq!(first, second);
    }

    /// A rule blowing up internally must not silence the other rules.
    #[tokio::test]
    async fn test_failed_rule_is_isolated() {
        // i64::MAX + 1 overflows the offense-sum rule; the same view also
        // carries a missing total for the completeness rule to find.
        let overflow = view_row(1, 2020, [i64::MAX, 1, 0, 0, 0, 0], Some(1));
        let missing_total = view_row(2, 2020, [1; 6], None);

        let issues = run_audit(&[overflow, missing_total], &QualityThresholds::default()).await;

        assert!(issues.iter().all(|i| i.category != Category::Logic));
        let completeness = issues
            .iter()
            .find(|i| i.category == Category::Completeness)
            .unwrap();
        assert_eq!(completeness.failed_rows, 1);
    }
}
