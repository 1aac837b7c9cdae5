// vigie-core/src/application/profiler.rs

// Column-level profiling over bounded samples. Produces the standalone
// `profiling_results.html` page the patched data docs link to.

use serde::Serialize;
use tracing::warn;

use crate::domain::batch::BatchRequest;
use crate::error::VigieError;
use crate::infrastructure::config::pipeline::PipelineConfig;
use crate::infrastructure::fs::atomic_write;
use crate::infrastructure::store::DataContext;
use crate::ports::warehouse::Warehouse;

// --- DTOs (Data Transfer Objects) ---

#[derive(Debug, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub null_count: u64,
    pub distinct_count: u64,
}

#[derive(Debug, Serialize)]
pub struct TableProfile {
    pub table: String,
    pub row_count: u64,
    pub columns: Vec<ColumnProfile>,
}

// --- PROFILER SERVICE ---

pub struct DataProfiler;

impl DataProfiler {
    /// Profile one table's bounded sample: row count plus per-column null
    /// and distinct counts.
    pub async fn profile_table(
        warehouse: &dyn Warehouse,
        batch: &BatchRequest,
    ) -> Result<TableProfile, VigieError> {
        let table = &batch.data_asset_name;
        let sample = batch.to_query();

        let schema = warehouse.fetch_columns(table).await?;
        let row_count = warehouse
            .query_scalar(&format!("SELECT count(*) FROM ({}) AS batch", sample))
            .await?;

        let mut columns = Vec::with_capacity(schema.len());
        for col in &schema {
            let null_count = warehouse
                .query_scalar(&format!(
                    "SELECT count(*) FROM ({}) AS batch WHERE {} IS NULL",
                    sample, col.name
                ))
                .await?;
            let distinct_count = warehouse
                .query_scalar(&format!(
                    "SELECT count(DISTINCT {}) FROM ({}) AS batch",
                    col.name, sample
                ))
                .await?;

            columns.push(ColumnProfile {
                name: col.name.clone(),
                data_type: col.data_type.clone(),
                is_nullable: col.is_nullable,
                null_count,
                distinct_count,
            });
        }

        Ok(TableProfile {
            table: table.clone(),
            row_count,
            columns,
        })
    }

    /// Profile every configured table and write the report page. A table
    /// that fails to profile is skipped with a warning; the page is built
    /// from whatever succeeded. Returns the path of the generated page.
    pub async fn build_report(
        ctx: &DataContext,
        warehouse: &dyn Warehouse,
        config: &PipelineConfig,
    ) -> Result<String, VigieError> {
        let params = &config.other_params;
        let mut profiles = Vec::new();

        for table in &config.input_tables {
            let batch = BatchRequest::new(&params.gx_data_src_name, table, params.row_count_limit);
            match Self::profile_table(warehouse, &batch).await {
                Ok(profile) => profiles.push(profile),
                Err(e) => warn!(table = %table, "Profiling skipped: {}", e),
            }
        }

        let report_path = ctx.data_docs_dir().join("profiling_results.html");
        atomic_write(&report_path, render_html(warehouse.engine_name(), &profiles))
            .map_err(VigieError::Infrastructure)?;

        println!("🔬 Profiling report generated at: {}", report_path.display());
        Ok(report_path.to_string_lossy().to_string())
    }
}

fn render_html(engine: &str, profiles: &[TableProfile]) -> String {
    let sections: String = profiles
        .iter()
        .map(|p| {
            let rows: String = p
                .columns
                .iter()
                .map(|c| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        c.name,
                        c.data_type,
                        if c.is_nullable { "YES" } else { "NO" },
                        c.null_count,
                        c.distinct_count
                    )
                })
                .collect();
            format!(
                r#"  <section>
    <h2>{table} ({rows_n} rows sampled)</h2>
    <table>
      <thead><tr><th>Column</th><th>Type</th><th>Nullable</th><th>Nulls</th><th>Distinct</th></tr></thead>
      <tbody>
{rows}      </tbody>
    </table>
  </section>
"#,
                table = p.table,
                rows_n = p.row_count,
                rows = rows
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Vigie Profiling Results</title>
</head>
<body>
  <nav>
    <h1>🔬 Profiling Results</h1>
    <p>Engine: {engine}</p>
    <a href="index.html">Back to Data Docs</a>
  </nav>
{sections}
  <footer>
    <p>Generated by vigie.</p>
  </footer>
</body>
</html>
"#,
        engine = engine,
        sections = sections
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::duckdb::DuckDbWarehouse;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    async fn seeded_warehouse() -> Result<DuckDbWarehouse> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        warehouse
            .execute(
                "CREATE TABLE orders (id INTEGER NOT NULL, status VARCHAR);
                 INSERT INTO orders VALUES (1, 'open'), (2, 'open'), (3, NULL);",
            )
            .await?;
        Ok(warehouse)
    }

    #[tokio::test]
    async fn test_profile_table_counts() -> Result<()> {
        let warehouse = seeded_warehouse().await?;
        let batch = BatchRequest::new("sf_src", "orders", 1000);

        let profile = DataProfiler::profile_table(&warehouse, &batch).await?;

        assert_eq!(profile.row_count, 3);
        let id = profile.columns.iter().find(|c| c.name == "id").unwrap();
        assert!(!id.is_nullable);
        let status = profile.columns.iter().find(|c| c.name == "status").unwrap();
        assert!(status.is_nullable);
        assert_eq!(status.null_count, 1);
        // count(DISTINCT) ignores NULLs
        assert_eq!(status.distinct_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_build_report_writes_page_and_skips_missing_tables() -> Result<()> {
        let dir = tempdir()?;
        let ctx = crate::infrastructure::store::DataContext::open(dir.path())?;
        let warehouse = seeded_warehouse().await?;

        let config = crate::infrastructure::config::pipeline::PipelineConfig {
            input_tables: vec!["orders".into(), "ghost".into()],
            other_params: crate::infrastructure::config::pipeline::OtherParams {
                gx_data_src_name: "sf_src".into(),
                row_count_limit: 1000,
                exclude_column_names: vec![],
                suite_naming: Default::default(),
                overwrite_existing: false,
            },
        };

        let path = DataProfiler::build_report(&ctx, &warehouse, &config).await?;
        let html = fs::read_to_string(path)?;

        assert!(html.contains("<h2>orders (3 rows sampled)</h2>"));
        assert!(html.contains("<p>Engine: duckdb</p>"));
        assert!(html.contains("<tr><td>id</td><td>INTEGER</td><td>NO</td><td>0</td><td>3</td></tr>"));
        assert!(!html.contains("ghost"));
        Ok(())
    }
}
