// refmart/src/commands/query.rs
//
// USE CASE: execute a raw SQL statement against the warehouse (ad-hoc).

use refmart_core::application::execute_query;
use refmart_core::infrastructure::adapters::duckdb::DuckDbWarehouse;

pub async fn execute(query: String, db_path: String) -> anyhow::Result<()> {
    let warehouse = DuckDbWarehouse::new(&db_path)?;
    execute_query(&warehouse, &query).await?;
    println!("✅ Query executed.");
    Ok(())
}
