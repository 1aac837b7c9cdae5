// vigie-core/src/infrastructure/config/mod.rs

pub mod connection;
pub mod pipeline;

pub use connection::SnowflakeSettings;
pub use pipeline::{OtherParams, PipelineConfig, load_pipeline_config};
