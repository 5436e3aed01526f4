// refmart/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "refmart")]
#[command(about = "County referral data mart: ETL + data quality audit", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the full pipeline (Extract -> Dimensions -> Facts -> Audit -> Report)
    Run {
        /// Project directory (must contain refmart.yaml)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// ⚡ Executes a raw SQL statement against the warehouse (Ad-hoc)
    Query {
        query: String,
        #[arg(long, default_value = "refmart.duckdb")]
        db_path: String,
    },

    /// 🔍 Inspects a warehouse table (schema + row count)
    Inspect {
        /// Path to the DuckDB database file
        #[arg(long, default_value = "refmart.duckdb")]
        db_path: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["refmart", "run"]);
        match args.command {
            Commands::Run { project_dir } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_project_dir() -> Result<()> {
        let args = Cli::parse_from(["refmart", "run", "--project-dir", "/tmp/mart"]);
        match args.command {
            Commands::Run { project_dir } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp/mart");
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::parse_from(["refmart", "inspect", "--table", "Dim_County"]);
        match args.command {
            Commands::Inspect { table, db_path } => {
                assert_eq!(table, "Dim_County");
                assert_eq!(db_path, "refmart.duckdb");
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_query() -> Result<()> {
        let args = Cli::parse_from(["refmart", "query", "SELECT 1"]);
        match args.command {
            Commands::Query { query, db_path } => {
                assert_eq!(query, "SELECT 1");
                assert_eq!(db_path, "refmart.duckdb");
                Ok(())
            }
            _ => bail!("Expected Query command"),
        }
    }
}
