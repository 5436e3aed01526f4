// refmart-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::quality::QualityThresholds;
use crate::infrastructure::error::InfrastructureError;

/// Project manifest (`refmart.yaml`). Every field has a default so a minimal
/// file (or just a name) is enough to run.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Raw referral extract, relative to the project directory.
    #[serde(default = "default_extract_path")]
    pub extract_path: String,

    /// Optional county -> region lookup. Absent or missing on disk means
    /// every county falls back to the sentinel region.
    #[serde(default)]
    pub regions_path: Option<String>,

    /// DuckDB database file for the dimensional store.
    #[serde(default = "default_warehouse_path")]
    pub warehouse_path: String,

    /// Build artifacts directory (run metadata).
    #[serde(default = "default_target_path")]
    pub target_path: String,

    /// Destination of the quality report CSV.
    #[serde(default = "default_report_path")]
    pub report_path: String,

    #[serde(default)]
    #[validate(nested)]
    pub quality: QualityThresholds,
}

fn default_name() -> String {
    "refmart".to_string()
}

fn default_extract_path() -> String {
    "data/referrals.csv".to_string()
}

fn default_warehouse_path() -> String {
    "refmart.duckdb".to_string()
}

fn default_target_path() -> String {
    "target".to_string()
}

fn default_report_path() -> String {
    "target/data_quality_report.csv".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            extract_path: default_extract_path(),
            regions_path: None,
            warehouse_path: default_warehouse_path(),
            target_path: default_target_path(),
            report_path: default_report_path(),
            quality: QualityThresholds::default(),
        }
    }
}

#[instrument]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Find the manifest
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    // 2. Parse YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Env overrides (layering pattern):
    //    REFMART_WAREHOUSE_PATH=/tmp/mart.duckdb refmart run
    apply_env_overrides(&mut config);

    // 4. Sanity-check thresholds before anything runs
    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    let candidates = ["refmart.yaml", "refmart.yml"];
    for filename in candidates {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, candidates
    )))
}

fn apply_env_overrides(config: &mut ProjectConfig) {
    if let Ok(val) = std::env::var("REFMART_WAREHOUSE_PATH") {
        info!(old = ?config.warehouse_path, new = ?val, "Overriding warehouse path via ENV");
        config.warehouse_path = val;
    }
    if let Ok(val) = std::env::var("REFMART_REPORT_PATH") {
        info!(old = ?config.report_path, new = ?val, "Overriding report path via ENV");
        config.report_path = val;
    }
}
