// refmart/src/main.rs

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug refmart run ... for the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: RUN PIPELINE ---
        // Exit 0 even when issues are found: a completed audit is a success.
        Commands::Run { project_dir } => {
            if let Err(e) = commands::run::execute(project_dir).await {
                eprintln!("💥 PIPELINE FAILED: {e}");
                std::process::exit(1);
            }
        }

        // --- USE CASE: AD-HOC QUERY ---
        Commands::Query { query, db_path } => {
            if let Err(e) = commands::query::execute(query, db_path).await {
                eprintln!("❌ Query failed: {e}");
                std::process::exit(1);
            }
        }

        // --- USE CASE: INSPECT TABLE ---
        Commands::Inspect { db_path, table } => {
            if let Err(e) = commands::inspect::execute(db_path, table).await {
                eprintln!("❌ Inspect failed: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
