// vigie-core/src/domain/batch.rs

use serde::{Deserialize, Serialize};

/// Name kept from the report generator's default connector so stored batch
/// requests stay readable by its tooling.
pub const DEFAULT_DATA_CONNECTOR: &str = "default_configured_data_connector_name";

/// Describes a bounded query against one table of a registered datasource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchRequest {
    pub datasource_name: String,
    pub data_connector_name: String,
    pub data_asset_name: String,
    pub limit: u64,
}

impl BatchRequest {
    pub fn new(datasource_name: &str, data_asset_name: &str, limit: u64) -> Self {
        Self {
            datasource_name: datasource_name.to_string(),
            data_connector_name: DEFAULT_DATA_CONNECTOR.to_string(),
            data_asset_name: data_asset_name.to_string(),
            limit,
        }
    }

    /// The bounded SELECT this batch resolves to.
    pub fn to_query(&self) -> String {
        format!(
            "SELECT * FROM {} LIMIT {}",
            self.data_asset_name, self.limit
        )
    }
}
