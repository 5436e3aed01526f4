// refmart-core/src/domain/dimensions.rs
//
// Surrogate key assignment is sort-then-rank over the distinct natural keys:
// a pure function of the input set, with no shared counter. The two
// dimensions are independent and can be built in any order.

use std::collections::HashMap;

use crate::domain::error::DomainError;
use crate::domain::referral::RawReferralRecord;

/// Region attached to counties absent from the lookup table. Never null.
pub const UNKNOWN_REGION: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRow {
    pub year_id: u32,
    pub year: i32,
}

/// Year -> surrogate YearID mapping (dense, 1-based, ascending year order).
///
/// Recomputed from scratch on every run: a YearID is stable only while the
/// input year set is stable. Interleaving a new earlier year shifts the ranks
/// of everything after it.
#[derive(Debug, Clone)]
pub struct TimeDimension {
    rows: Vec<TimeRow>,
    index: HashMap<i32, u32>,
}

impl TimeDimension {
    pub fn from_records(records: &[RawReferralRecord]) -> Result<Self, DomainError> {
        if records.is_empty() {
            return Err(DomainError::EmptyInput);
        }

        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();

        let rows: Vec<TimeRow> = years
            .into_iter()
            .enumerate()
            .map(|(rank, year)| TimeRow {
                year_id: (rank + 1) as u32,
                year,
            })
            .collect();
        let index = rows.iter().map(|r| (r.year, r.year_id)).collect();

        Ok(Self { rows, index })
    }

    pub fn rows(&self) -> &[TimeRow] {
        &self.rows
    }

    pub fn id_for(&self, year: i32) -> Option<u32> {
        self.index.get(&year).copied()
    }

    /// Reverse lookup for the audit join. IDs are dense and 1-based.
    pub fn year_of(&self, year_id: u32) -> Option<i32> {
        self.rows.get(year_id.checked_sub(1)? as usize).map(|r| r.year)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyRow {
    pub county_id: u32,
    pub county: String,
    pub region: String,
}

/// County name -> surrogate CountyID mapping (dense, 1-based, lexicographic
/// name order, case-sensitive as the extract spells them), plus the Region
/// attribute from the external lookup.
#[derive(Debug, Clone)]
pub struct CountyDimension {
    rows: Vec<CountyRow>,
    index: HashMap<String, u32>,
}

impl CountyDimension {
    /// Left-joins county names against the lookup on exact match. Counties
    /// without a lookup entry get [`UNKNOWN_REGION`]; no fuzzy matching and
    /// no error for unmatched names.
    pub fn from_records(
        records: &[RawReferralRecord],
        regions: &HashMap<String, String>,
    ) -> Result<Self, DomainError> {
        if records.is_empty() {
            return Err(DomainError::EmptyInput);
        }

        let mut names: Vec<&str> = records.iter().map(|r| r.county.as_str()).collect();
        names.sort_unstable();
        names.dedup();

        let rows: Vec<CountyRow> = names
            .into_iter()
            .enumerate()
            .map(|(rank, name)| CountyRow {
                county_id: (rank + 1) as u32,
                county: name.to_string(),
                region: regions
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
            })
            .collect();
        let index = rows.iter().map(|r| (r.county.clone(), r.county_id)).collect();

        Ok(Self { rows, index })
    }

    pub fn rows(&self) -> &[CountyRow] {
        &self.rows
    }

    pub fn id_for(&self, county: &str) -> Option<u32> {
        self.index.get(county).copied()
    }

    /// Reverse lookup for the audit join. IDs are dense and 1-based.
    pub fn row_of(&self, county_id: u32) -> Option<&CountyRow> {
        self.rows.get(county_id.checked_sub(1)? as usize)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
