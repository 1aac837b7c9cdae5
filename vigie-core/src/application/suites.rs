// vigie-core/src/application/suites.rs

use chrono::Local;
use futures::StreamExt; // Extension trait for streams

use crate::application::assistant::OnboardingAssistant;
use crate::domain::batch::BatchRequest;
use crate::domain::suite::SuiteNamingScheme;
use crate::error::VigieError;
use crate::infrastructure::config::pipeline::PipelineConfig;
use crate::infrastructure::store::DataContext;
use crate::ports::warehouse::Warehouse;

/// Per-table naming keeps suite names collision-free, so tables can fan out
/// across a bounded pool. Run-wide naming funnels every table into the same
/// suite file and must run one table at a time.
const SUITE_POOL_SIZE: usize = 4;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SuiteRunSummary {
    pub success: bool,
    pub suites_built: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Build one expectation suite per configured table.
///
/// Failure policy: per-table isolation. A failed table is recorded in the
/// summary and the run continues to the next table; the caller decides the
/// exit code from `summary.success`.
pub async fn build_suites(
    ctx: &DataContext,
    warehouse: &dyn Warehouse,
    config: &PipelineConfig,
) -> Result<SuiteRunSummary, VigieError> {
    let today = Local::now().date_naive();
    let params = &config.other_params;

    println!(
        "🧠 Building expectation suites for {} table(s)...",
        config.input_tables.len()
    );

    let futures = config.input_tables.iter().map(|table| {
        let suite_name = params.suite_naming.suite_name(today, table);
        let batch = BatchRequest::new(&params.gx_data_src_name, table, params.row_count_limit);

        async move {
            if !params.overwrite_existing && ctx.suite_exists(&suite_name) {
                println!("   ⏭️  Suite '{}' already exists (overwrite off)", suite_name);
                return (table.clone(), Ok(None));
            }

            let result = async {
                let suite = OnboardingAssistant::run(
                    warehouse,
                    &batch,
                    &suite_name,
                    &params.exclude_column_names,
                )
                .await?;
                ctx.save_suite(&suite)?;
                Ok::<String, VigieError>(suite_name.clone())
            }
            .await;

            (table.clone(), result.map(Some))
        }
    });

    let pool_size = match params.suite_naming {
        SuiteNamingScheme::PerTable => SUITE_POOL_SIZE,
        SuiteNamingScheme::RunWide => 1,
    };
    let stream = futures::stream::iter(futures).buffer_unordered(pool_size);
    let results: Vec<_> = stream.collect().await;

    let mut built = 0;
    let mut skipped = 0;
    let mut errors = Vec::new();

    for (table, result) in results {
        match result {
            Ok(Some(suite_name)) => {
                println!("   ✅ Suite saved: {}", suite_name);
                built += 1;
            }
            Ok(None) => skipped += 1,
            Err(e) => {
                eprintln!("   ❌ Suite failed for {}: {}", table, e);
                errors.push(format!("{}: {}", table, e));
            }
        }
    }

    let summary = SuiteRunSummary {
        success: errors.is_empty(),
        suites_built: built,
        skipped,
        errors,
    };

    println!(
        "📝 Suite run: {} built, {} skipped, {} failed",
        summary.suites_built,
        summary.skipped,
        summary.errors.len()
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::suite::SuiteNamingScheme;
    use crate::infrastructure::adapters::duckdb::DuckDbWarehouse;
    use crate::infrastructure::config::pipeline::OtherParams;
    use anyhow::Result;
    use tempfile::tempdir;

    fn config(tables: &[&str], overwrite: bool) -> PipelineConfig {
        PipelineConfig {
            input_tables: tables.iter().map(|t| t.to_string()).collect(),
            other_params: OtherParams {
                gx_data_src_name: "ds1".into(),
                row_count_limit: 100,
                exclude_column_names: vec![],
                suite_naming: SuiteNamingScheme::PerTable,
                overwrite_existing: overwrite,
            },
        }
    }

    async fn seeded_warehouse() -> Result<DuckDbWarehouse> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        warehouse
            .execute(
                "CREATE TABLE orders (id INTEGER); INSERT INTO orders VALUES (1), (2);
                 CREATE TABLE customers (id INTEGER); INSERT INTO customers VALUES (7);",
            )
            .await?;
        Ok(warehouse)
    }

    #[tokio::test]
    async fn test_build_suites_all_tables() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        let warehouse = seeded_warehouse().await?;

        let summary = build_suites(&ctx, &warehouse, &config(&["orders", "customers"], true)).await?;

        assert!(summary.success);
        assert_eq!(summary.suites_built, 2);
        assert_eq!(ctx.list_suites()?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_table_is_isolated() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        let warehouse = seeded_warehouse().await?;

        let summary =
            build_suites(&ctx, &warehouse, &config(&["orders", "ghost"], true)).await?;

        // 'ghost' fails, 'orders' still lands
        assert!(!summary.success);
        assert_eq!(summary.suites_built, 1);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].starts_with("ghost:"));
        Ok(())
    }

    #[tokio::test]
    async fn test_run_wide_naming_builds_a_single_suite() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        let warehouse = seeded_warehouse().await?;

        let mut cfg = config(&["orders", "customers"], false);
        cfg.other_params.suite_naming = SuiteNamingScheme::RunWide;

        let summary = build_suites(&ctx, &warehouse, &cfg).await?;

        // Both tables target the same run-wide name; the first one to run
        // lands it and the second sees it and skips.
        assert!(summary.success);
        assert_eq!(summary.suites_built, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(ctx.list_suites()?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_overwrite_off_skips_existing() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        let warehouse = seeded_warehouse().await?;

        build_suites(&ctx, &warehouse, &config(&["orders"], true)).await?;
        let second = build_suites(&ctx, &warehouse, &config(&["orders"], false)).await?;

        assert!(second.success);
        assert_eq!(second.suites_built, 0);
        assert_eq!(second.skipped, 1);
        Ok(())
    }
}
