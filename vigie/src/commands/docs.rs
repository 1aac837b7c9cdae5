// vigie/src/commands/docs.rs
//
// USE CASE: Rebuild the data docs site from the store.

use std::path::Path;

use vigie_core::application::DataDocsBuilder;
use vigie_core::infrastructure::store::DataContext;

pub async fn execute(project_dir: &Path) -> anyhow::Result<()> {
    println!("📚 Generating data docs...");

    let ctx = DataContext::open(project_dir)?;
    let path = DataDocsBuilder::build(&ctx)?;

    println!("✨ Documentation generated successfully at {}", path);
    Ok(())
}
