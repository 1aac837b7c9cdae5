// vigie/src/commands/query.rs
//
// USE CASE: Execute a raw SQL query (ad-hoc), with optional minijinja
// argument substitution.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use vigie_core::application::execute_query;
use vigie_core::application::ports::renderer::TemplateEngine;
use vigie_core::infrastructure::adapters::duckdb::DuckDbWarehouse;
use vigie_core::infrastructure::render::jinja::JinjaRenderer;

pub async fn execute(
    sql_query: Option<String>,
    sql_file: Option<PathBuf>,
    args_json: Option<String>,
    db_path: &str,
) -> anyhow::Result<()> {
    let raw_sql = match (sql_query, sql_file) {
        (Some(sql), None) => sql,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read SQL file {:?}", path))?,
        _ => bail!("Provide exactly one of --sql-query or --sql-file."),
    };

    let sql = match args_json {
        Some(json) => {
            let args: serde_json::Value =
                serde_json::from_str(&json).context("Invalid JSON in --args-json")?;
            let renderer = JinjaRenderer::new();
            renderer.render(&raw_sql, &args)?
        }
        None => raw_sql,
    };

    let warehouse = DuckDbWarehouse::new(db_path)
        .with_context(|| format!("Failed to open warehouse at {}", db_path))?;

    execute_query(&warehouse, &sql).await?;
    println!("✨ Query executed successfully.");
    Ok(())
}
