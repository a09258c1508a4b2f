pub mod aspects;
pub mod orchestrator;
pub mod text;

pub use orchestrator::{run_isolated, AnalysisRequest, Orchestrator};
