// vigie-core/src/infrastructure/config/pipeline.rs

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::suite::SuiteNamingScheme;
use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

// --- TYPED CONFIG (post-validation) ---

#[derive(Debug, Clone, Validate)]
pub struct PipelineConfig {
    /// Table identifiers, lowercased, order preserved.
    #[validate(length(min = 1, message = "Invalid or empty 'input_tables' in the YAML file."))]
    pub input_tables: Vec<String>,
    #[validate(nested)]
    pub other_params: OtherParams,
}

#[derive(Debug, Clone, Validate)]
pub struct OtherParams {
    #[validate(length(
        min = 1,
        message = "Invalid or missing key 'gx_data_src_name' in other_params."
    ))]
    pub gx_data_src_name: String,
    #[validate(range(
        min = 1,
        message = "Invalid or missing key 'row_count_limit' in other_params."
    ))]
    pub row_count_limit: u64,
    pub exclude_column_names: Vec<String>,
    pub suite_naming: SuiteNamingScheme,
    pub overwrite_existing: bool,
}

// --- RAW SHAPE (as found on disk) ---
// Everything optional: a missing key must surface as a ConfigError, never as
// a parse crash.

#[derive(Debug, Deserialize)]
struct RawPipelineConfig {
    input_tables: Option<Vec<Option<String>>>,
    #[serde(default)]
    other_params: RawOtherParams,
}

#[derive(Debug, Deserialize, Default)]
struct RawOtherParams {
    gx_data_src_name: Option<String>,
    row_count_limit: Option<u64>,
    #[serde(default)]
    exclude_column_names: Vec<String>,
    #[serde(default)]
    suite_naming: SuiteNamingScheme,
    #[serde(default = "default_overwrite")]
    overwrite_existing: bool,
}

fn default_overwrite() -> bool {
    true
}

// --- LOADER ---

#[instrument(skip(config_path))] // Log automatique de l'entrée/sortie de la fonction
pub fn load_pipeline_config(config_path: &Path) -> Result<PipelineConfig, InfrastructureError> {
    if !config_path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            config_path.to_string_lossy().to_string(),
        ));
    }

    // IO/YAML failures are distinct from content validation failures below.
    let content = fs::read_to_string(config_path).map_err(InfrastructureError::Io)?;
    let raw: RawPipelineConfig =
        serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)?;

    let config = validate_raw(raw)?;
    info!(tables = config.input_tables.len(), "Pipeline config loaded");

    Ok(config)
}

fn validate_raw(raw: RawPipelineConfig) -> Result<PipelineConfig, InfrastructureError> {
    // Lowercase and drop blank entries; order preserved.
    let input_tables: Vec<String> = raw
        .input_tables
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let config = PipelineConfig {
        input_tables,
        other_params: OtherParams {
            gx_data_src_name: raw.other_params.gx_data_src_name.unwrap_or_default(),
            row_count_limit: raw.other_params.row_count_limit.unwrap_or_default(),
            exclude_column_names: raw.other_params.exclude_column_names,
            suite_naming: raw.other_params.suite_naming,
            overwrite_existing: raw.other_params.overwrite_existing,
        },
    };

    config.validate().map_err(|e| {
        // Surface the first message as-is; the full report is in Debug.
        let msg = e
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| e.to_string());
        InfrastructureError::ConfigError(msg)
    })?;

    Ok(config)
}
