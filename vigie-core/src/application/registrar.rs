// vigie-core/src/application/registrar.rs

use tracing::info;

use crate::error::VigieError;
use crate::infrastructure::config::connection::SnowflakeSettings;
use crate::infrastructure::config::pipeline::PipelineConfig;
use crate::infrastructure::store::DataContext;

/// Register the configured datasource and one bounded query asset per table.
///
/// Idempotent: re-running overwrites existing registrations instead of
/// duplicating them. Returns the number of assets registered.
pub fn register_sources(
    ctx: &DataContext,
    settings: &SnowflakeSettings,
    config: &PipelineConfig,
) -> Result<usize, VigieError> {
    let datasource = &config.other_params.gx_data_src_name;
    let limit = config.other_params.row_count_limit;

    ctx.add_datasource(datasource, &settings.connection_string())?;

    for table in &config.input_tables {
        let query = format!("SELECT * FROM {} LIMIT {}", table, limit);
        ctx.add_query_asset(datasource, table, &query)?;
        println!("   🔌 Registered asset: {} -> {}", datasource, table);
    }

    info!(
        datasource = %datasource,
        assets = config.input_tables.len(),
        "Source registration complete"
    );
    Ok(config.input_tables.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::suite::SuiteNamingScheme;
    use crate::infrastructure::config::pipeline::OtherParams;
    use anyhow::Result;
    use tempfile::tempdir;

    fn sample_config(tables: &[&str]) -> PipelineConfig {
        PipelineConfig {
            input_tables: tables.iter().map(|t| t.to_string()).collect(),
            other_params: OtherParams {
                gx_data_src_name: "ds1".into(),
                row_count_limit: 500,
                exclude_column_names: vec![],
                suite_naming: SuiteNamingScheme::PerTable,
                overwrite_existing: true,
            },
        }
    }

    fn sample_settings() -> SnowflakeSettings {
        SnowflakeSettings {
            account: "acme".into(),
            user: "u".into(),
            password: "p".into(),
            database: "db".into(),
            schema: "sch".into(),
            warehouse: "wh".into(),
            role: "r".into(),
        }
    }

    #[test]
    fn test_register_sources_builds_bounded_queries() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;

        let registered =
            register_sources(&ctx, &sample_settings(), &sample_config(&["orders", "customers"]))?;
        assert_eq!(registered, 2);

        let sources = ctx.datasources()?;
        assert_eq!(sources.len(), 1);
        assert_eq!(
            sources[0].connection_string,
            "snowflake://u:p@acme/db/sch?warehouse=wh&role=r"
        );
        assert_eq!(sources[0].assets[0].query, "SELECT * FROM orders LIMIT 500");
        Ok(())
    }

    #[test]
    fn test_register_sources_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        let config = sample_config(&["orders"]);

        register_sources(&ctx, &sample_settings(), &config)?;
        register_sources(&ctx, &sample_settings(), &config)?;

        let sources = ctx.datasources()?;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].assets.len(), 1);
        Ok(())
    }
}
