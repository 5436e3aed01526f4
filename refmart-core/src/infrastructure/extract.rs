// refmart-core/src/infrastructure/extract.rs
//
// CSV readers for the two inputs: the raw referral extract and the optional
// county -> region lookup. Both are read fully and closed before any
// transformation begins.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domain::referral::RawReferralRecord;
use crate::infrastructure::error::InfrastructureError;

/// Loads the raw referral extract. A missing file is fatal; blank count
/// cells become `None` and are judged later by the audit, not here.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_referral_extract<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<RawReferralRecord>, InfrastructureError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InfrastructureError::ExtractNotFound(
            path.display().to_string(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }

    info!(rows = records.len(), "Extract loaded");
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RegionRecord {
    #[serde(rename = "County")]
    county: String,
    #[serde(rename = "Region")]
    region: String,
    // The lookup also carries a State column; the mart does not use it.
}

/// Loads the county -> region lookup table.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_region_lookup<P: AsRef<Path>>(
    path: P,
) -> Result<HashMap<String, String>, InfrastructureError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut regions = HashMap::new();
    for result in reader.deserialize() {
        let record: RegionRecord = result?;
        regions.insert(record.county, record.region);
    }

    info!(counties = regions.len(), "Region lookup loaded");
    Ok(regions)
}
