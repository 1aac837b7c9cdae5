// vigie-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Assistant failed on '{table}': {reason}")]
    #[diagnostic(
        code(vigie::domain::assistant),
        help("The expectation inference could not complete. Check that the table is registered and queryable.")
    )]
    AssistantError { table: String, reason: String },

    #[error("Checkpoint '{0}' execution failed: {1}")]
    #[diagnostic(code(vigie::domain::checkpoint))]
    CheckpointError(String, String),

    #[error("Expected report pattern not found in '{file}'")]
    #[diagnostic(
        code(vigie::domain::patch),
        help(
            "The data docs markup does not match the known report-generator output. The generator version is probably incompatible."
        )
    )]
    PatternNotFound { file: String },

    #[error("Expectation suite '{0}' not found in the store")]
    #[diagnostic(code(vigie::domain::suite_not_found))]
    SuiteNotFound(String),
}
