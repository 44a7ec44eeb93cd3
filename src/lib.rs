// Internal modules required when compiled as a library for tests.
pub mod app;
pub mod checks;
pub mod client;
pub mod config;
pub mod db;
pub mod report;
pub mod worker;
// Re-export commonly used types for tests
pub use checks::workflow::classify_analyze_status;
pub use report::{CheckReport, CheckStatus, StepReport};
pub use worker::{mock_analysis_task, AnalysisVerdict, WorkerRegistry};
