// vigie-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex};

// Imports Hexagonaux
use crate::error::VigieError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::warehouse::{ColumnSchema, Warehouse};

/// Local warehouse engine. Stands behind the `Warehouse` port for dev runs
/// and tests; remote engines consume the registered connection descriptor
/// from the store instead.
pub struct DuckDbWarehouse {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbWarehouse {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, VigieError> {
        self.conn.lock().map_err(|_| {
            VigieError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

fn db_err(e: duckdb::Error) -> VigieError {
    VigieError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
}

#[async_trait]
impl Warehouse for DuckDbWarehouse {
    async fn execute(&self, query: &str) -> Result<(), VigieError> {
        let conn = self.lock_conn()?;
        conn.execute_batch(query).map_err(db_err)
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, VigieError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(query).map_err(db_err)?;

        let mut rows = stmt.query([]).map_err(db_err)?;
        let row = rows
            .next()
            .map_err(db_err)?
            .ok_or_else(|| VigieError::InternalError("No scalar value returned".into()))?;

        let value: u64 = row.get(0).map_err(db_err)?;
        Ok(value)
    }

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, VigieError> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info('{}')", table_name))
            .map_err(db_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ColumnSchema {
                    name: row.get("name")?,
                    data_type: row.get("type")?,
                    is_nullable: !row.get::<_, bool>("notnull")?,
                })
            })
            .map_err(db_err)?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row.map_err(db_err)?);
        }

        Ok(columns)
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
