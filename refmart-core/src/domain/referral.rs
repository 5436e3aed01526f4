// refmart-core/src/domain/referral.rs

use serde::Deserialize;

/// One row of the county-level referral extract.
/// Natural keys: calendar year + county name. Read once per run, never mutated.
///
/// Count measures deserialize as `Option<i64>` so blank cells survive to the
/// completeness rule instead of failing the extract load.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RawReferralRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "Juv_Pop")]
    pub juvenile_population: Option<i64>,
    #[serde(rename = "Violent_Felony")]
    pub violent_felony: Option<i64>,
    #[serde(rename = "Other_Felony")]
    pub other_felony: Option<i64>,
    #[serde(rename = "Misd")]
    pub misdemeanor: Option<i64>,
    #[serde(rename = "VOP")]
    pub vop: Option<i64>,
    #[serde(rename = "Status_Offense")]
    pub status_offense: Option<i64>,
    #[serde(rename = "CINS")]
    pub cins: Option<i64>,
    #[serde(rename = "Total_Referrals")]
    pub total_referrals: Option<i64>,
    #[serde(rename = "Referral_Rate")]
    pub referral_rate: Option<f64>,
    #[serde(rename = "Unique_Youth")]
    pub unique_youth: Option<i64>,
}

/// The measure columns carried from the extract into the fact table.
/// Copied verbatim: no rounding, no unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Measures {
    pub juvenile_population: Option<i64>,
    pub violent_felony: Option<i64>,
    pub other_felony: Option<i64>,
    pub misdemeanor: Option<i64>,
    pub vop: Option<i64>,
    pub status_offense: Option<i64>,
    pub cins: Option<i64>,
    pub total_referrals: Option<i64>,
    pub referral_rate: Option<f64>,
    pub unique_youth: Option<i64>,
}

impl From<&RawReferralRecord> for Measures {
    fn from(record: &RawReferralRecord) -> Self {
        Self {
            juvenile_population: record.juvenile_population,
            violent_felony: record.violent_felony,
            other_felony: record.other_felony,
            misdemeanor: record.misdemeanor,
            vop: record.vop,
            status_offense: record.status_offense,
            cins: record.cins,
            total_referrals: record.total_referrals,
            referral_rate: record.referral_rate,
            unique_youth: record.unique_youth,
        }
    }
}

impl Measures {
    /// The six offense-category counts, in the order they are summed
    /// against `Total_Referrals`.
    pub fn offense_categories(&self) -> [Option<i64>; 6] {
        [
            self.violent_felony,
            self.other_felony,
            self.misdemeanor,
            self.vop,
            self.status_offense,
            self.cins,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measures_copy_through() {
        let raw = RawReferralRecord {
            year: 2020,
            county: "ADAMS".to_string(),
            juvenile_population: Some(1000),
            violent_felony: Some(1),
            other_felony: Some(1),
            misdemeanor: Some(1),
            vop: Some(1),
            status_offense: Some(1),
            cins: Some(1),
            total_referrals: Some(6),
            referral_rate: Some(6.0),
            unique_youth: Some(5),
        };
        let measures = Measures::from(&raw);
        assert_eq!(measures.total_referrals, Some(6));
        assert_eq!(measures.referral_rate, Some(6.0));
        assert_eq!(measures.offense_categories(), [Some(1); 6]);
    }
}
