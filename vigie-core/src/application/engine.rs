// vigie-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::VigieError;
use crate::ports::warehouse::Warehouse;

/// Run one raw SQL statement with instrumentation (logs + timing). Every
/// ad-hoc query from the CLI goes through here so its latency is visible.
#[instrument(skip(warehouse), fields(query.len = query.len()))]
pub async fn execute_query(warehouse: &dyn Warehouse, query: &str) -> Result<(), VigieError> {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::duckdb::DuckDbWarehouse;
    use anyhow::Result;

    #[tokio::test]
    async fn test_execute_query_propagates_engine_errors() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;

        execute_query(&warehouse, "CREATE TABLE t (id INTEGER)").await?;
        assert!(execute_query(&warehouse, "SELECT broken FROM nowhere")
            .await
            .is_err());
        Ok(())
    }
}
