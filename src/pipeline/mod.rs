// Pipeline module
// Orchestrates the smoothing and detection stages

pub mod run;

pub use run::{run_detection, PipelineConfig, PipelineError, PipelineOutcome};
