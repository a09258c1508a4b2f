pub mod analysis;
pub mod scorecard;
pub mod transcription;

pub use analysis::{
    Analysis, AnalysisErrors, AspectResult, AudioAnalysis, ConfidenceMetrics, DetailedAnalysis,
    GrammarAnalysis, GrammarError, KeywordAnalysis, RepeatedWord, RepetitionAnalysis,
    SentenceComplexity,
};
pub use scorecard::{grade_for, Scorecard};
pub use transcription::Transcription;
