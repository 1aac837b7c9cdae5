// vigie/src/commands/checkpoint.rs
//
// USE CASE: Run a checkpoint over all configured tables.

use std::path::Path;

use anyhow::{Context, bail};
use chrono::Local;
use vigie_core::application::run_checkpoint;
use vigie_core::domain::batch::BatchRequest;
use vigie_core::domain::checkpoint::{Checkpoint, ValidationBinding};
use vigie_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use vigie_core::infrastructure::config::pipeline::{PipelineConfig, load_pipeline_config};
use vigie_core::infrastructure::store::DataContext;

pub async fn execute(
    project_dir: &Path,
    config_file: &str,
    db_path: &str,
    name: &str,
) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config_path = project_dir.join(config_file);
    let config = load_pipeline_config(&config_path)
        .with_context(|| format!("Failed to load pipeline configuration from {:?}", config_path))?;

    let ctx = DataContext::open(project_dir)?;
    let warehouse = DuckDbWarehouse::new(db_path)
        .with_context(|| format!("Failed to open warehouse at {}", db_path))?;

    let checkpoint = build_checkpoint(&ctx, &config, name)?;
    let result = run_checkpoint(&ctx, &warehouse, &checkpoint).await?;

    for identifier in result.list_validation_result_identifiers() {
        println!("   📋 {}", identifier);
    }

    if result.success {
        println!("\n✨ SUCCESS! Checkpoint '{}' passed.", name);
        Ok(())
    } else {
        eprintln!("\n❌ FAILURE. Checkpoint '{}' has failed validations.", name);
        std::process::exit(1);
    }
}

/// Bind each configured table to its expectation suite.
///
/// Prefers today's date-stamped suite; falls back to the most recent suite
/// for the same table so a checkpoint can run days after its suites were
/// built.
pub fn build_checkpoint(
    ctx: &DataContext,
    config: &PipelineConfig,
    name: &str,
) -> anyhow::Result<Checkpoint> {
    let today = Local::now().date_naive();
    let params = &config.other_params;
    let existing = ctx.list_suites()?;

    let mut validations = Vec::with_capacity(config.input_tables.len());
    for table in &config.input_tables {
        let dated = params.suite_naming.suite_name(today, table);
        let suite_name = if existing.contains(&dated) {
            dated
        } else {
            // Names are date-prefixed, so the lexically-last match is the
            // most recent one. Compare the part after the date exactly so a
            // table never binds a suite whose name merely shares a suffix
            // (e.g. 'orders' vs '20240101_big_orders').
            let wanted = dated
                .split_once('_')
                .map(|(_, rest)| rest.to_string())
                .unwrap_or_default();
            match existing
                .iter()
                .rev()
                .find(|s| s.split_once('_').is_some_and(|(_, rest)| rest == wanted))
            {
                Some(found) => found.clone(),
                None => bail!(
                    "No expectation suite found for table '{}'. Run `vigie build-suites` first.",
                    table
                ),
            }
        };

        validations.push(ValidationBinding {
            batch_request: BatchRequest::new(
                &params.gx_data_src_name,
                table,
                params.row_count_limit,
            ),
            expectation_suite_name: suite_name,
        });
    }

    Ok(Checkpoint {
        name: name.to_string(),
        validations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;
    use vigie_core::domain::suite::{Expectation, ExpectationSuite, SuiteNamingScheme};
    use vigie_core::infrastructure::config::pipeline::OtherParams;

    fn config_for(tables: &[&str]) -> PipelineConfig {
        PipelineConfig {
            input_tables: tables.iter().map(|t| t.to_string()).collect(),
            other_params: OtherParams {
                gx_data_src_name: "sf_src".into(),
                row_count_limit: 1000,
                exclude_column_names: vec![],
                suite_naming: SuiteNamingScheme::PerTable,
                overwrite_existing: false,
            },
        }
    }

    #[test]
    fn test_build_checkpoint_falls_back_to_latest_suite() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        for name in ["20240101_orders", "20240201_orders"] {
            ctx.save_suite(&ExpectationSuite {
                name: name.into(),
                table: "orders".into(),
                created_at: "2024-01-01T00:00:00Z".into(),
                expectations: vec![Expectation::RowCountBetween { min: 1, max: 1 }],
            })?;
        }

        let checkpoint = build_checkpoint(&ctx, &config_for(&["orders"]), "my_checkpoint")?;

        assert_eq!(checkpoint.validations.len(), 1);
        assert_eq!(
            checkpoint.validations[0].expectation_suite_name,
            "20240201_orders"
        );
        Ok(())
    }

    #[test]
    fn test_build_checkpoint_ignores_suites_of_other_tables_sharing_a_suffix() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        // 'big_orders' ends with 'orders' but belongs to another table
        ctx.save_suite(&ExpectationSuite {
            name: "20240101_big_orders".into(),
            table: "big_orders".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            expectations: vec![Expectation::RowCountBetween { min: 1, max: 1 }],
        })?;

        let err = build_checkpoint(&ctx, &config_for(&["orders"]), "my_checkpoint").unwrap_err();
        assert!(err.to_string().contains("table 'orders'"));
        assert!(err.to_string().contains("build-suites"));
        Ok(())
    }

    #[test]
    fn test_build_checkpoint_fails_without_suites() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;

        let err = build_checkpoint(&ctx, &config_for(&["orders"]), "my_checkpoint").unwrap_err();
        assert!(err.to_string().contains("build-suites"));
        Ok(())
    }
}
