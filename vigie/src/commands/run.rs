// vigie/src/commands/run.rs
//
// USE CASE: Run the full pipeline in one shot:
// register -> suites -> checkpoint -> docs -> profiling -> patch.

use std::path::Path;

use anyhow::Context;
use vigie_core::application::{
    DataProfiler, build_suites, patch_data_docs, register_sources, run_checkpoint,
};
use vigie_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use vigie_core::infrastructure::config::connection::SnowflakeSettings;
use vigie_core::infrastructure::config::pipeline::load_pipeline_config;
use vigie_core::infrastructure::store::DataContext;

use crate::commands::checkpoint::build_checkpoint;

pub async fn execute(
    project_dir: &Path,
    config_file: &str,
    db_path: &str,
    checkpoint_name: &str,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config_path = project_dir.join(config_file);
    let config = load_pipeline_config(&config_path)
        .with_context(|| format!("Failed to load pipeline configuration from {:?}", config_path))?;
    println!("   Tables: {}", config.input_tables.len());

    let settings = SnowflakeSettings::from_env()?;

    // B. Instantiate the DB Adapter (DuckDB)
    let ctx = DataContext::open(project_dir)?;
    let warehouse = DuckDbWarehouse::new(db_path)
        .with_context(|| format!("Failed to open warehouse at {}", db_path))?;

    // C. Pipeline stages (Application Layer)
    register_sources(&ctx, &settings, &config)?;

    let summary = build_suites(&ctx, &warehouse, &config).await?;
    if !summary.success {
        eprintln!("\n❌ FAILURE. {} table(s) failed during suite building.", summary.errors.len());
        std::process::exit(1);
    }

    let checkpoint = build_checkpoint(&ctx, &config, checkpoint_name)?;
    let result = run_checkpoint(&ctx, &warehouse, &checkpoint).await?;

    DataProfiler::build_report(&ctx, &warehouse, &config).await?;
    patch_data_docs(ctx.data_docs_dir(), &project_dir.join("templates"))?;

    if result.success {
        println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        Ok(())
    } else {
        eprintln!("\n❌ FAILURE. Checkpoint '{}' has failed validations.", checkpoint_name);
        std::process::exit(1);
    }
}
