// vigie-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;

pub use duckdb::DuckDbWarehouse;
