// refmart-core/src/domain/facts.rs

use std::fmt;

use tracing::warn;

use crate::domain::dimensions::{CountyDimension, TimeDimension};
use crate::domain::referral::{Measures, RawReferralRecord};

/// One fact row: both surrogate keys plus the measures.
/// The (CountyID, YearID) pair is intended to be unique, but the builder does
/// not enforce it; the uniqueness rule in the audit reports violations.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    pub county_id: u32,
    pub year_id: u32,
    pub measures: Measures,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnknownYear(i32),
    UnknownCounty(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnknownYear(year) => {
                write!(f, "year {year} has no entry in the time dimension")
            }
            RejectReason::UnknownCounty(county) => {
                write!(f, "county '{county}' has no entry in the county dimension")
            }
        }
    }
}

/// A raw record that failed the dimension join, kept with its reason instead
/// of being silently discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub year: i32,
    pub county: String,
    pub reason: RejectReason,
}

/// Result of the fact build: the joined facts plus the rejects.
#[derive(Debug, Clone, PartialEq)]
pub struct FactBuild {
    pub facts: Vec<FactRow>,
    pub rejected: Vec<RejectedRecord>,
}

/// Joins each raw record to both dimensions by exact natural-key equality.
///
/// When the dimensions are derived from the same extract every record joins;
/// the reject path exists because the builder must also behave when invoked
/// against dimensions built from a different extract. Rejection is never
/// fatal. Output ordering is unspecified; downstream re-sorts where order
/// matters.
pub fn build_facts(
    records: &[RawReferralRecord],
    time: &TimeDimension,
    counties: &CountyDimension,
) -> FactBuild {
    let mut facts = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        let Some(year_id) = time.id_for(record.year) else {
            rejected.push(RejectedRecord {
                year: record.year,
                county: record.county.clone(),
                reason: RejectReason::UnknownYear(record.year),
            });
            continue;
        };
        let Some(county_id) = counties.id_for(&record.county) else {
            rejected.push(RejectedRecord {
                year: record.year,
                county: record.county.clone(),
                reason: RejectReason::UnknownCounty(record.county.clone()),
            });
            continue;
        };

        facts.push(FactRow {
            county_id,
            year_id,
            measures: Measures::from(record),
        });
    }

    FactBuild { facts, rejected }
}

/// A fact row annotated with its dimension attributes, the shape the audit
/// rules operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct FactView {
    pub county_id: u32,
    pub year_id: u32,
    pub county: String,
    pub region: String,
    pub year: i32,
    pub measures: Measures,
}

/// Joins facts back to both dimensions for the audit. A fact whose keys no
/// longer resolve cannot occur when facts and dimensions come from the same
/// build; such a row is logged and skipped rather than aborting the audit.
pub fn join_dimensions(
    facts: &[FactRow],
    time: &TimeDimension,
    counties: &CountyDimension,
) -> Vec<FactView> {
    facts
        .iter()
        .filter_map(|fact| {
            let year = time.year_of(fact.year_id);
            let county = counties.row_of(fact.county_id);
            match (year, county) {
                (Some(year), Some(county)) => Some(FactView {
                    county_id: fact.county_id,
                    year_id: fact.year_id,
                    county: county.county.clone(),
                    region: county.region.clone(),
                    year,
                    measures: fact.measures.clone(),
                }),
                _ => {
                    warn!(
                        county_id = fact.county_id,
                        year_id = fact.year_id,
                        "Fact row excluded from audit: surrogate keys do not resolve"
                    );
                    None
                }
            }
        })
        .collect()
}
