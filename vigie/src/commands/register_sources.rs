// vigie/src/commands/register_sources.rs
//
// USE CASE: Register the warehouse datasource and one query asset per table.

use std::path::Path;

use anyhow::Context;
use vigie_core::application::register_sources;
use vigie_core::infrastructure::config::connection::SnowflakeSettings;
use vigie_core::infrastructure::config::pipeline::load_pipeline_config;
use vigie_core::infrastructure::store::DataContext;

pub async fn execute(project_dir: &Path, config_file: &str) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config_path = project_dir.join(config_file);
    let config = load_pipeline_config(&config_path)
        .with_context(|| format!("Failed to load pipeline configuration from {:?}", config_path))?;
    println!("   Tables: {}", config.input_tables.len());

    // Credentials only come from the environment, never from files.
    let settings = SnowflakeSettings::from_env()?;

    let ctx = DataContext::open(project_dir)?;
    let assets = register_sources(&ctx, &settings, &config)?;

    println!(
        "✨ Datasource '{}' registered with {} asset(s).",
        config.other_params.gx_data_src_name, assets
    );
    Ok(())
}
