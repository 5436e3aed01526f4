// refmart-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection, params};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::dimensions::{CountyRow, TimeRow};
use crate::domain::facts::FactRow;
use crate::error::RefmartError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::warehouse::{ColumnSchema, Warehouse};

const DIM_TIME_DDL: &str =
    "CREATE OR REPLACE TABLE Dim_Time (YearID INTEGER NOT NULL, Year INTEGER NOT NULL)";

const DIM_COUNTY_DDL: &str = "CREATE OR REPLACE TABLE Dim_County (\
     CountyID INTEGER NOT NULL, County VARCHAR NOT NULL, Region VARCHAR NOT NULL)";

const FACT_DDL: &str = "CREATE OR REPLACE TABLE Fact_Referrals (\
     CountyID INTEGER NOT NULL, YearID INTEGER NOT NULL, \
     Juv_Pop BIGINT, Violent_Felony BIGINT, Other_Felony BIGINT, Misd BIGINT, \
     VOP BIGINT, Status_Offense BIGINT, CINS BIGINT, \
     Total_Referrals BIGINT, Referral_Rate DOUBLE, Unique_Youth BIGINT)";

// Non-unique indexes on the fact foreign keys for downstream query speed.
// CREATE OR REPLACE TABLE drops them with the old table, so plain CREATE
// is safe after every refresh.
const FACT_INDEX_DDL: &str = "CREATE INDEX idx_fact_county ON Fact_Referrals(CountyID); \
     CREATE INDEX idx_fact_year ON Fact_Referrals(YearID);";

fn db_err(e: duckdb::Error) -> RefmartError {
    RefmartError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
}

pub struct DuckDbWarehouse {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbWarehouse {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RefmartError> {
        self.conn.lock().map_err(|_| {
            RefmartError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

#[async_trait]
impl Warehouse for DuckDbWarehouse {
    async fn execute(&self, query: &str) -> Result<(), RefmartError> {
        let conn = self.lock()?;
        conn.execute_batch(query).map_err(db_err)
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, RefmartError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query).map_err(db_err)?;
        let mut rows = stmt.query([]).map_err(db_err)?;

        let row = rows
            .next()
            .map_err(db_err)?
            .ok_or_else(|| RefmartError::InternalError("No scalar value returned".into()))?;

        let value: u64 = row.get(0).map_err(db_err)?;
        Ok(value)
    }

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, RefmartError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info('{}')", table_name))
            .map_err(db_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ColumnSchema {
                    name: row.get("name")?,
                    data_type: row.get("type")?,
                    is_nullable: !row.get::<_, bool>("notnull")?,
                })
            })
            .map_err(db_err)?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row.map_err(db_err)?);
        }

        Ok(columns)
    }

    async fn store_time_dimension(&self, rows: &[TimeRow]) -> Result<(), RefmartError> {
        let conn = self.lock()?;
        conn.execute_batch(DIM_TIME_DDL).map_err(db_err)?;

        let mut appender = conn.appender("Dim_Time").map_err(db_err)?;
        for row in rows {
            appender
                .append_row(params![row.year_id, row.year])
                .map_err(db_err)?;
        }
        appender.flush().map_err(db_err)?;
        Ok(())
    }

    async fn store_county_dimension(&self, rows: &[CountyRow]) -> Result<(), RefmartError> {
        let conn = self.lock()?;
        conn.execute_batch(DIM_COUNTY_DDL).map_err(db_err)?;

        let mut appender = conn.appender("Dim_County").map_err(db_err)?;
        for row in rows {
            appender
                .append_row(params![row.county_id, row.county, row.region])
                .map_err(db_err)?;
        }
        appender.flush().map_err(db_err)?;
        Ok(())
    }

    async fn store_facts(&self, rows: &[FactRow]) -> Result<(), RefmartError> {
        let conn = self.lock()?;
        conn.execute_batch(FACT_DDL).map_err(db_err)?;

        {
            let mut appender = conn.appender("Fact_Referrals").map_err(db_err)?;
            for row in rows {
                let m = &row.measures;
                appender
                    .append_row(params![
                        row.county_id,
                        row.year_id,
                        m.juvenile_population,
                        m.violent_felony,
                        m.other_felony,
                        m.misdemeanor,
                        m.vop,
                        m.status_offense,
                        m.cins,
                        m.total_referrals,
                        m.referral_rate,
                        m.unique_youth,
                    ])
                    .map_err(db_err)?;
            }
            appender.flush().map_err(db_err)?;
        }

        conn.execute_batch(FACT_INDEX_DDL).map_err(db_err)?;
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
