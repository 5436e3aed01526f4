// refmart/src/commands/inspect.rs
//
// USE CASE: inspect a warehouse table (schema + row count).

use comfy_table::Table;
use refmart_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use refmart_core::ports::warehouse::Warehouse;

pub async fn execute(db_path: String, table_name: String) -> anyhow::Result<()> {
    let warehouse = DuckDbWarehouse::new(&db_path)?;

    let columns = warehouse.fetch_columns(&table_name).await?;
    if columns.is_empty() {
        anyhow::bail!("Table '{}' not found in {}", table_name, db_path);
    }

    let mut table = Table::new();
    table.set_header(["Column", "Type", "Nullable"]);
    for col in &columns {
        table.add_row([
            col.name.as_str(),
            col.data_type.as_str(),
            if col.is_nullable { "YES" } else { "NO" },
        ]);
    }

    let row_count = warehouse
        .query_scalar(&format!("SELECT count(*) FROM \"{}\"", table_name))
        .await?;

    println!("📊 {table_name} ({row_count} rows)");
    println!("{table}");
    Ok(())
}
