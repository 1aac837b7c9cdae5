// vigie/src/commands/build_suites.rs
//
// USE CASE: Build one expectation suite per configured table.

use std::path::Path;

use anyhow::Context;
use vigie_core::application::build_suites;
use vigie_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use vigie_core::infrastructure::config::pipeline::load_pipeline_config;
use vigie_core::infrastructure::store::DataContext;

pub async fn execute(project_dir: &Path, config_file: &str, db_path: &str) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    println!("⚙️  Loading configuration...");
    let config_path = project_dir.join(config_file);
    let config = load_pipeline_config(&config_path)
        .with_context(|| format!("Failed to load pipeline configuration from {:?}", config_path))?;

    let ctx = DataContext::open(project_dir)?;
    let warehouse = DuckDbWarehouse::new(db_path)
        .with_context(|| format!("Failed to open warehouse at {}", db_path))?;

    let summary = build_suites(&ctx, &warehouse, &config).await?;

    if summary.success {
        println!(
            "\n✨ SUCCESS! {} suite(s) built, {} skipped, in {:.2?}",
            summary.suites_built,
            summary.skipped,
            start.elapsed()
        );
        Ok(())
    } else {
        for error in &summary.errors {
            eprintln!("   ❌ {}", error);
        }
        eprintln!("\n❌ FAILURE. {} table(s) failed.", summary.errors.len());
        std::process::exit(1);
    }
}
