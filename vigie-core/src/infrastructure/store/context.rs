// vigie-core/src/infrastructure/store/context.rs

// Filesystem-backed validation context. The previous generation of scripts
// relied on a process-global context handle initialized at import time; here
// the context is opened explicitly at pipeline start and passed into each
// stage. Every mutation is an atomic write, so there is nothing to flush.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::checkpoint::CheckpointResult;
use crate::domain::error::DomainError;
use crate::domain::suite::ExpectationSuite;
use crate::error::VigieError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

const DATASOURCES_FILE: &str = "datasources.yaml";

// --- REGISTRATION DTOs ---

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssetRegistration {
    pub name: String,
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatasourceRegistration {
    pub name: String,
    pub connection_string: String,
    #[serde(default)]
    pub assets: Vec<AssetRegistration>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
struct DatasourceList {
    datasources: Vec<DatasourceRegistration>,
}

// --- CONTEXT ---

pub struct DataContext {
    store_dir: PathBuf,
    docs_dir: PathBuf,
}

impl DataContext {
    /// Open (and lay out) the store under `<project>/store/` and the docs
    /// site under `<project>/data_docs/local_site/`.
    pub fn open(project_dir: &Path) -> Result<Self, InfrastructureError> {
        let store_dir = project_dir.join("store");
        let docs_dir = project_dir.join("data_docs").join("local_site");

        for dir in [
            store_dir.join("expectations"),
            store_dir.join("checkpoints"),
            docs_dir.clone(),
        ] {
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(InfrastructureError::Io)?;
            }
        }

        info!(store = ?store_dir, "Data context opened");
        Ok(Self {
            store_dir,
            docs_dir,
        })
    }

    pub fn data_docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    // --- DATASOURCES ---

    fn datasources_path(&self) -> PathBuf {
        self.store_dir.join(DATASOURCES_FILE)
    }

    fn load_datasources(&self) -> Result<DatasourceList, InfrastructureError> {
        let path = self.datasources_path();
        if !path.exists() {
            // Pas d'erreur, juste une liste vide. C'est normal au début d'un projet.
            return Ok(DatasourceList::default());
        }
        let content = fs::read_to_string(&path).map_err(InfrastructureError::Io)?;
        serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)
    }

    fn save_datasources(&self, list: &DatasourceList) -> Result<(), InfrastructureError> {
        let content = serde_yaml::to_string(list).map_err(InfrastructureError::YamlError)?;
        atomic_write(self.datasources_path(), content)
    }

    /// Upsert a datasource registration (re-registration overwrites).
    pub fn add_datasource(
        &self,
        name: &str,
        connection_string: &str,
    ) -> Result<(), VigieError> {
        let mut list = self.load_datasources()?;

        match list.datasources.iter_mut().find(|d| d.name == name) {
            Some(existing) => {
                existing.connection_string = connection_string.to_string();
            }
            None => list.datasources.push(DatasourceRegistration {
                name: name.to_string(),
                connection_string: connection_string.to_string(),
                assets: Vec::new(),
            }),
        }

        self.save_datasources(&list)?;
        debug!(datasource = name, "Datasource registered");
        Ok(())
    }

    /// Upsert a query asset under a datasource. At most one registration per
    /// (datasource, asset) pair.
    pub fn add_query_asset(
        &self,
        datasource: &str,
        asset_name: &str,
        query: &str,
    ) -> Result<(), VigieError> {
        let mut list = self.load_datasources()?;

        let ds = list
            .datasources
            .iter_mut()
            .find(|d| d.name == datasource)
            .ok_or_else(|| {
                VigieError::Infrastructure(InfrastructureError::ConfigError(format!(
                    "Datasource '{}' is not registered",
                    datasource
                )))
            })?;

        match ds.assets.iter_mut().find(|a| a.name == asset_name) {
            Some(existing) => existing.query = query.to_string(),
            None => ds.assets.push(AssetRegistration {
                name: asset_name.to_string(),
                query: query.to_string(),
            }),
        }

        self.save_datasources(&list)?;
        Ok(())
    }

    pub fn datasources(&self) -> Result<Vec<DatasourceRegistration>, InfrastructureError> {
        Ok(self.load_datasources()?.datasources)
    }

    // --- EXPECTATION SUITES ---

    fn suite_path(&self, name: &str) -> PathBuf {
        self.store_dir
            .join("expectations")
            .join(format!("{}.yaml", name))
    }

    /// Persist a suite (overwrite-if-exists semantics).
    pub fn save_suite(&self, suite: &ExpectationSuite) -> Result<(), VigieError> {
        let content = serde_yaml::to_string(suite)
            .map_err(|e| VigieError::Infrastructure(InfrastructureError::YamlError(e)))?;
        atomic_write(self.suite_path(&suite.name), content)
            .map_err(VigieError::Infrastructure)?;
        debug!(suite = %suite.name, "Expectation suite saved");
        Ok(())
    }

    pub fn suite_exists(&self, name: &str) -> bool {
        self.suite_path(name).exists()
    }

    pub fn load_suite(&self, name: &str) -> Result<ExpectationSuite, VigieError> {
        let path = self.suite_path(name);
        if !path.exists() {
            return Err(VigieError::Domain(DomainError::SuiteNotFound(
                name.to_string(),
            )));
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| VigieError::Infrastructure(InfrastructureError::Io(e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| VigieError::Infrastructure(InfrastructureError::YamlError(e)))
    }

    /// Suite names currently in the store, sorted for stable docs output.
    pub fn list_suites(&self) -> Result<Vec<String>, InfrastructureError> {
        let dir = self.store_dir.join("expectations");
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(InfrastructureError::Io)? {
            let entry = entry.map_err(InfrastructureError::Io)?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("yaml")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    // --- CHECKPOINT RESULTS ---

    fn checkpoint_path(&self, checkpoint_name: &str, run_stamp: &str) -> PathBuf {
        self.store_dir
            .join("checkpoints")
            .join(format!("{}_{}.json", checkpoint_name, run_stamp))
    }

    pub fn save_checkpoint_result(
        &self,
        result: &CheckpointResult,
        run_stamp: &str,
    ) -> Result<(), VigieError> {
        let content = serde_json::to_string_pretty(result)
            .map_err(|e| VigieError::InternalError(format!("Serialization: {}", e)))?;
        atomic_write(
            self.checkpoint_path(&result.checkpoint_name, run_stamp),
            content,
        )
        .map_err(VigieError::Infrastructure)?;
        Ok(())
    }

    /// All stored checkpoint results, most recent last (filename order).
    pub fn list_checkpoint_results(&self) -> Result<Vec<CheckpointResult>, VigieError> {
        let dir = self.store_dir.join("checkpoints");
        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(|e| VigieError::Infrastructure(InfrastructureError::Io(e)))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path)
                .map_err(|e| VigieError::Infrastructure(InfrastructureError::Io(e)))?;
            let result: CheckpointResult = serde_json::from_str(&content)
                .map_err(|e| VigieError::InternalError(format!("Corrupt checkpoint result: {}", e)))?;
            results.push(result);
        }
        Ok(results)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::suite::Expectation;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_layout() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;

        assert!(dir.path().join("store/expectations").is_dir());
        assert!(dir.path().join("store/checkpoints").is_dir());
        assert!(ctx.data_docs_dir().is_dir());
        Ok(())
    }

    #[test]
    fn test_datasource_and_asset_upsert_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;

        ctx.add_datasource("ds1", "snowflake://u:p@a/d/s?warehouse=w&role=r")?;
        ctx.add_query_asset("ds1", "orders", "SELECT * FROM orders LIMIT 500")?;
        // Re-registration overwrites, never duplicates
        ctx.add_query_asset("ds1", "orders", "SELECT * FROM orders LIMIT 100")?;

        let sources = ctx.datasources()?;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].assets.len(), 1);
        assert_eq!(sources[0].assets[0].query, "SELECT * FROM orders LIMIT 100");
        Ok(())
    }

    #[test]
    fn test_asset_requires_registered_datasource() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        let err = ctx
            .add_query_asset("ghost", "orders", "SELECT 1")
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
        Ok(())
    }

    #[test]
    fn test_suite_save_overwrite_and_load() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;

        let mut suite = ExpectationSuite {
            name: "20240307_orders".into(),
            table: "orders".into(),
            created_at: "2024-03-07T00:00:00Z".into(),
            expectations: vec![Expectation::RowCountBetween { min: 1, max: 1 }],
        };
        ctx.save_suite(&suite)?;
        assert!(ctx.suite_exists("20240307_orders"));

        // Overwrite-if-exists
        suite.expectations.push(Expectation::ColumnToExist {
            column: "id".into(),
        });
        ctx.save_suite(&suite)?;

        let loaded = ctx.load_suite("20240307_orders")?;
        assert_eq!(loaded.expectations.len(), 2);
        assert_eq!(ctx.list_suites()?, vec!["20240307_orders"]);
        Ok(())
    }

    #[test]
    fn test_load_missing_suite_is_domain_error() -> Result<()> {
        let dir = tempdir()?;
        let ctx = DataContext::open(dir.path())?;
        let err = ctx.load_suite("nope").unwrap_err();
        assert!(matches!(
            err,
            VigieError::Domain(crate::domain::error::DomainError::SuiteNotFound(_))
        ));
        Ok(())
    }
}
