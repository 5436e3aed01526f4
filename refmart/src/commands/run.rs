// refmart/src/commands/run.rs
//
// USE CASE: full pipeline run. Finding issues is a successful audit; the
// command only fails on unrecoverable input or persistence errors.

use std::path::PathBuf;

use comfy_table::Table;
use refmart_core::application::run_pipeline;
use refmart_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use refmart_core::infrastructure::config::load_project_config;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir)?;
    println!("   Project: {}", config.name);

    let db_path = project_dir.join(&config.warehouse_path);
    let warehouse = DuckDbWarehouse::new(&db_path.to_string_lossy())?;

    let result = run_pipeline(&project_dir, &config, &warehouse).await?;

    if result.rejected_records > 0 {
        println!(
            "⚠️  {} record(s) failed the dimension join and were dropped (see logs).",
            result.rejected_records
        );
    }

    if result.issues.is_empty() {
        println!("✅ No data quality issues found.");
    } else {
        println!("🔎 {} data quality issue(s) found:", result.issues.len());
        let mut table = Table::new();
        table.set_header(["Category", "Rule", "Failed_Rows", "Severity", "Details"]);
        for issue in &result.issues {
            table.add_row([
                issue.category.as_str(),
                issue.rule,
                &issue.failed_rows.to_string(),
                issue.severity.as_str(),
                &issue.details,
            ]);
        }
        println!("{table}");
    }

    Ok(())
}
