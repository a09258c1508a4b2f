pub mod hf;

pub use hf::{ChatMessage, HfClient, LabelScore, ZeroShotOutcome};
