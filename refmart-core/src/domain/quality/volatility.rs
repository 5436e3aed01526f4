// refmart-core/src/domain/quality/volatility.rs

use crate::domain::facts::FactView;

pub struct YoyCheck;

impl YoyCheck {
    /// Counts county-years whose `Total_Referrals` moved by more than
    /// `threshold` (as a ratio) against the same county's immediately
    /// preceding year.
    ///
    /// Partitions by county, sorts each partition ascending by year, and
    /// compares each row to the row just before it. The first row of a
    /// partition has no prior and is never flagged. Priors at or below
    /// `floor` are ignored to suppress noise from small counties where a
    /// 1 -> 2 change registers as 100%. A missing `Total_Referrals` breaks
    /// the chain: the row is neither flagged nor usable as a prior.
    pub fn count_outliers(view: &[FactView], threshold: f64, floor: i64) -> u64 {
        let mut ordered: Vec<&FactView> = view.iter().collect();
        ordered.sort_by(|a, b| (a.county_id, a.year).cmp(&(b.county_id, b.year)));

        let mut flagged = 0u64;
        let mut prev: Option<(u32, Option<i64>)> = None;

        for row in ordered {
            let current = row.measures.total_referrals;
            if let Some((prev_county, Some(prior))) = prev
                && prev_county == row.county_id
                && prior > floor
                && let Some(current) = current
            {
                let pct_change = (current - prior) as f64 / prior as f64;
                if pct_change.abs() > threshold {
                    flagged += 1;
                }
            }
            prev = Some((row.county_id, current));
        }

        flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::referral::Measures;

    fn view_row(county_id: u32, year: i32, total: Option<i64>) -> FactView {
        FactView {
            county_id,
            year_id: (year - 2018) as u32,
            county: format!("C{county_id}"),
            region: "Unknown".to_string(),
            year,
            measures: Measures {
                juvenile_population: None,
                violent_felony: None,
                other_felony: None,
                misdemeanor: None,
                vop: None,
                status_offense: None,
                cins: None,
                total_referrals: total,
                referral_rate: None,
                unique_youth: None,
            },
        }
    }

    #[test]
    fn test_sixty_percent_jump_is_flagged() {
        // 100 -> 160: pct change 0.6 > 0.5 and prior 100 > 10.
        let view = vec![view_row(1, 2020, Some(100)), view_row(1, 2021, Some(160))];
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 1);
    }

    #[test]
    fn test_small_count_noise_is_suppressed() {
        // 5 -> 10 is a 100% change but the prior is at the floor.
        let view = vec![view_row(1, 2020, Some(5)), view_row(1, 2021, Some(10))];
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 0);
    }

    #[test]
    fn test_first_year_per_county_never_flagged() {
        // Two counties, one year each: no priors exist anywhere.
        let view = vec![view_row(1, 2020, Some(500)), view_row(2, 2020, Some(900))];
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 0);
    }

    #[test]
    fn test_partitions_do_not_bleed_across_counties() {
        // County 1 ends at 100, county 2 starts at 900: not a YoY pair.
        let view = vec![
            view_row(1, 2020, Some(100)),
            view_row(1, 2021, Some(105)),
            view_row(2, 2020, Some(900)),
            view_row(2, 2021, Some(910)),
        ];
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 0);
    }

    #[test]
    fn test_drop_is_flagged_symmetrically() {
        // 200 -> 80 is a -60% change; absolute value is compared.
        let view = vec![view_row(1, 2020, Some(200)), view_row(1, 2021, Some(80))];
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 1);
    }

    #[test]
    fn test_missing_total_breaks_the_chain() {
        // The gap year can neither be flagged nor serve as a prior.
        let view = vec![
            view_row(1, 2019, Some(100)),
            view_row(1, 2020, None),
            view_row(1, 2021, Some(400)),
        ];
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 0);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut view = vec![
            view_row(2, 2021, Some(910)),
            view_row(1, 2021, Some(160)),
            view_row(1, 2020, Some(100)),
            view_row(2, 2020, Some(900)),
        ];
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 1);
        view.reverse();
        assert_eq!(YoyCheck::count_outliers(&view, 0.5, 10), 1);
    }
}
