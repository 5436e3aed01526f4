// refmart-core/src/application/mod.rs

pub mod engine;
pub mod pipeline;
pub mod report;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI import use cases without knowing the file layout:
// `use refmart_core::application::{run_pipeline, run_audit, ...};`

pub use engine::execute_query;
pub use pipeline::{RunResult, run_pipeline};
pub use report::{render_report, write_report};
pub use validation::run_audit;
