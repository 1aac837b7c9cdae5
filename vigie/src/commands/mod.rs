// vigie/src/commands/mod.rs

pub mod build_suites;
pub mod checkpoint;
pub mod docs;
pub mod patch_docs;
pub mod profile;
pub mod query;
pub mod register_sources;
pub mod run;
