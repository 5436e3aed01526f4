// refmart-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::RefmartError;
use crate::ports::warehouse::Warehouse;

/// Runs a raw SQL statement against the warehouse with instrumentation
/// (logs + timing), for ad-hoc inspection of the dimensional store.
#[instrument(skip(warehouse), fields(query.len = query.len()))]
pub async fn execute_query(warehouse: &dyn Warehouse, query: &str) -> Result<(), RefmartError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = warehouse.execute(query).await;

    let duration = start.elapsed();
    match result {
        Ok(_) => {
            debug!("✅ Query finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            // Logged here to keep the timing context; still propagated.
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
