// vigie/src/commands/patch_docs.rs
//
// USE CASE: Apply the report patch passes to the generated data docs, then
// re-render the synced template so both artifacts agree.

use std::path::Path;

use vigie_core::application::{PatchOutcome, patch_data_docs};
use vigie_core::infrastructure::fs::atomic_write;
use vigie_core::infrastructure::render::JinjaRenderer;
use vigie_core::infrastructure::store::DataContext;

pub async fn execute(project_dir: &Path) -> anyhow::Result<()> {
    println!("🩹 Patching data docs...");

    let ctx = DataContext::open(project_dir)?;
    let templates_dir = project_dir.join("templates");

    let outcome = patch_data_docs(ctx.data_docs_dir(), &templates_dir)?;

    // Final render pass: the patched page comes back out of its template, so
    // a stale index.html can always be regenerated from templates/.
    let renderer = JinjaRenderer::with_template_dir(&templates_dir);
    let html = renderer.render_template("index.html.j2", &serde_json::json!({}))?;
    atomic_write(ctx.data_docs_dir().join("index.html"), html)?;

    match outcome {
        PatchOutcome::Patched => println!("✨ Data docs patched successfully."),
        PatchOutcome::AlreadyPatched => println!("⏭️  Data docs already patched, nothing to do."),
    }
    Ok(())
}
