// vigie/src/commands/profile.rs
//
// USE CASE: Generate the standalone profiling report page.

use std::path::Path;

use anyhow::Context;
use vigie_core::application::DataProfiler;
use vigie_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use vigie_core::infrastructure::config::pipeline::load_pipeline_config;
use vigie_core::infrastructure::store::DataContext;

pub async fn execute(project_dir: &Path, config_file: &str, db_path: &str) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config_path = project_dir.join(config_file);
    let config = load_pipeline_config(&config_path)
        .with_context(|| format!("Failed to load pipeline configuration from {:?}", config_path))?;

    let ctx = DataContext::open(project_dir)?;
    let warehouse = DuckDbWarehouse::new(db_path)
        .with_context(|| format!("Failed to open warehouse at {}", db_path))?;

    DataProfiler::build_report(&ctx, &warehouse, &config).await?;
    Ok(())
}
