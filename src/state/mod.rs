//! State module for tracking run progress
//!
//! A gallery run moves through a fixed sequence of stages. `RunStage` names
//! them and `StageTracker` enforces that the orchestrator only ever moves
//! forward one stage at a time, or into `Failed`.

mod run_stage;

// Re-export main types
pub use run_stage::{RunStage, StageTracker};
