// refmart-core/src/application/pipeline.rs
//
// Orchestrates one batch run: extract -> dimensions -> facts -> load ->
// audit -> report. Data moves between stages as in-memory tables;
// persistence only happens at the warehouse and report boundaries.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::warn;

use crate::application::report;
use crate::application::validation::run_audit;
use crate::domain::dimensions::{CountyDimension, TimeDimension, UNKNOWN_REGION};
use crate::domain::facts::{FactBuild, build_facts, join_dimensions};
use crate::domain::quality::QualityIssue;
use crate::error::RefmartError;
use crate::infrastructure::config::ProjectConfig;
use crate::infrastructure::extract::{read_referral_extract, read_region_lookup};
use crate::ports::warehouse::Warehouse;

#[derive(Debug, serde::Serialize)]
pub struct RunResult {
    pub years: usize,
    pub counties: usize,
    pub facts_loaded: usize,
    pub rejected_records: usize,
    pub issues: Vec<QualityIssue>,
    pub completed_at: String,
}

pub async fn run_pipeline(
    project_dir: &Path,
    config: &ProjectConfig,
    warehouse: &dyn Warehouse,
) -> Result<RunResult, RefmartError> {
    println!("🚀 Starting referral ETL pipeline...");
    let start_time = Instant::now();

    let target_dir = project_dir.join(&config.target_path);
    if !target_dir.exists() {
        fs::create_dir_all(&target_dir)?;
    }

    // 1. EXTRACT
    println!("📥 Extracting raw referrals...");
    let records = read_referral_extract(project_dir.join(&config.extract_path))?;
    let regions = load_regions(project_dir, config)?;

    // 2. TRANSFORM: dimensions first, then the fact join
    println!("🧱 Building dimensions...");
    let time = TimeDimension::from_records(&records)?;
    let counties = CountyDimension::from_records(&records, &regions)?;

    println!("🧮 Building fact table...");
    let FactBuild { facts, rejected } = build_facts(&records, &time, &counties);
    for reject in &rejected {
        warn!(
            year = reject.year,
            county = %reject.county,
            "Dropped unjoinable record: {}",
            reject.reason
        );
    }

    // 3. LOAD
    println!("💾 Loading warehouse ({})...", warehouse.engine_name());
    warehouse.store_time_dimension(time.rows()).await?;
    warehouse.store_county_dimension(counties.rows()).await?;
    warehouse.store_facts(&facts).await?;

    // 4. AUDIT: on the facts joined back to both dimensions
    println!("🧪 Running data quality audit...");
    let view = join_dimensions(&facts, &time, &counties);
    let issues = run_audit(&view, &config.quality).await;

    // 5. REPORT
    let report_path = project_dir.join(&config.report_path);
    report::write_report(&report_path, &issues)?;
    println!("📝 Quality report written to {}", report_path.display());

    let result = RunResult {
        years: time.len(),
        counties: counties.len(),
        facts_loaded: facts.len(),
        rejected_records: rejected.len(),
        issues,
        completed_at: chrono::Utc::now().to_rfc3339(),
    };
    save_json(&target_dir.join("run_results.json"), &result)?;

    println!(
        "✨ Done in {:.2?}. Loaded {} facts, {} counties, {} years.",
        start_time.elapsed(),
        result.facts_loaded,
        result.counties,
        result.years
    );

    Ok(result)
}

/// The region lookup is optional twice over: it may be unconfigured, or
/// configured but absent on disk. Either way the pipeline proceeds and the
/// county dimension falls back to the sentinel region.
fn load_regions(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<HashMap<String, String>, RefmartError> {
    let Some(rel_path) = &config.regions_path else {
        return Ok(HashMap::new());
    };

    let path = project_dir.join(rel_path);
    if !path.exists() {
        warn!(
            path = %path.display(),
            "Region lookup not found; all counties fall back to '{UNKNOWN_REGION}'"
        );
        return Ok(HashMap::new());
    }

    Ok(read_region_lookup(&path)?)
}

fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), RefmartError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| RefmartError::InternalError(format!("Serialization: {e}")))?;
    crate::infrastructure::fs::atomic_write(path, content)?;
    Ok(())
}
