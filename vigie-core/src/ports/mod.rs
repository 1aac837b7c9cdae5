// vigie-core/src/ports/mod.rs

pub mod warehouse;

pub use warehouse::{ColumnSchema, Warehouse};
