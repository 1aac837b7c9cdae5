// vigie-core/src/application/mod.rs

pub mod assistant;
pub mod checkpoint;
pub mod docs;
pub mod engine;
pub mod patcher;
pub mod ports;
pub mod profiler;
pub mod registrar;
pub mod suites;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write
// `use vigie_core::application::{build_suites, run_checkpoint, DataDocsBuilder};`
// without knowing the internal file layout.

pub use assistant::OnboardingAssistant;
pub use checkpoint::run_checkpoint;
pub use docs::DataDocsBuilder;
pub use engine::execute_query;
pub use patcher::{patch_data_docs, PatchOutcome};
pub use profiler::DataProfiler;
pub use registrar::register_sources;
pub use suites::{build_suites, SuiteRunSummary};
