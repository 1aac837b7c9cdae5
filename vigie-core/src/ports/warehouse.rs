// vigie-core/src/ports/warehouse.rs

// This file defines what the application needs from a warehouse, without
// knowing which engine answers. The assistant and the checkpoint runner only
// ever speak this contract.

use crate::error::VigieError;
use async_trait::async_trait;

// Struct simple pour décrire une colonne (indépendant de la DB)
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Fire-and-forget statement (DDL, setup).
    async fn execute(&self, query: &str) -> Result<(), VigieError>;

    /// Single-value aggregate (COUNT, COUNT DISTINCT...).
    async fn query_scalar(&self, query: &str) -> Result<u64, VigieError>;

    /// Column metadata for one table.
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, VigieError>;

    fn engine_name(&self) -> &str;
}
