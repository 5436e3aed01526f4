// refmart-core/src/ports/warehouse.rs
//
// Storage contract for the dimensional store. The application layer only
// knows this trait; the concrete engine lives behind it in infrastructure.

use crate::domain::dimensions::{CountyRow, TimeRow};
use crate::domain::facts::FactRow;
use crate::error::RefmartError;
use async_trait::async_trait;

// Engine-independent column description
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Runs a raw statement (ad-hoc queries, DDL).
    async fn execute(&self, query: &str) -> Result<(), RefmartError>;

    /// Runs a query expected to return a single numeric value.
    async fn query_scalar(&self, query: &str) -> Result<u64, RefmartError>;

    /// Describes a table's columns.
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, RefmartError>;

    /// Full refresh of `Dim_Time`. Replaces any prior content.
    async fn store_time_dimension(&self, rows: &[TimeRow]) -> Result<(), RefmartError>;

    /// Full refresh of `Dim_County`. Replaces any prior content.
    async fn store_county_dimension(&self, rows: &[CountyRow]) -> Result<(), RefmartError>;

    /// Full refresh of `Fact_Referrals`, including the foreign-key indexes.
    async fn store_facts(&self, rows: &[FactRow]) -> Result<(), RefmartError>;

    fn engine_name(&self) -> &str;
}
