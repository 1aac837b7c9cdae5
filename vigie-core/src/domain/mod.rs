// vigie-core/src/domain/mod.rs

pub mod batch;
pub mod checkpoint;
pub mod error;
pub mod suite;

pub use batch::BatchRequest;
pub use checkpoint::{Checkpoint, CheckpointResult, ValidationBinding, ValidationResult};
pub use suite::{Expectation, ExpectationSuite, SuiteNamingScheme};
