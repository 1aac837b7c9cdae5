// vigie-core/src/infrastructure/store/mod.rs

pub mod context;

pub use context::{AssetRegistration, DataContext, DatasourceRegistration};
