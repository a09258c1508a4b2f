use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result envelope for a single analysis aspect.
///
/// After a wrapped analyzer run exactly one of `data`/`error` is set; both
/// are `None` only when the aspect legitimately has no opinion (e.g. the
/// target label was absent from the remote response).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectResult<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> AspectResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn none() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn failed(label: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(label.into()),
        }
    }
}

/// Delivery metrics derived from the response, normalized to [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAnalysis {
    pub voice_modulation: Option<f32>,
    pub pacing: Option<f32>,
    pub fluency: Option<f32>,
    pub filler_word_count: u32,
    pub filler_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub relevance_score: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarError {
    #[serde(rename = "type")]
    pub kind: String,
    pub suggestion: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarAnalysis {
    pub error_count: Option<u32>,
    pub errors: Vec<GrammarError>,
    pub score: Option<f32>,
}

/// Derived deterministically from the transcript text; no external calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceComplexity {
    pub average_length: f32,
    pub complexity_score: f32,
    pub complex_sentences: u32,
    pub simple_sentences: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatedWord {
    pub word: String,
    pub count: u32,
    pub sentences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepetitionAnalysis {
    pub repeated_words: Vec<RepeatedWord>,
    pub repetition_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceMetrics {
    pub voice_modulation: Option<f32>,
    pub pacing: Option<f32>,
    pub vocabulary: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub audio: Option<AudioAnalysis>,
    pub keywords: Option<KeywordAnalysis>,
    pub grammar: Option<GrammarAnalysis>,
    pub sentence_complexity: SentenceComplexity,
    pub repetition: RepetitionAnalysis,
}

/// Which aspects failed, by slot. Mirrors the `null` data fields in the
/// composite report; a populated entry carries the analyzer's failure label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisErrors {
    pub sentiment: Option<String>,
    pub clarity: Option<String>,
    pub technical_accuracy: Option<String>,
    pub audio: Option<String>,
    pub keywords: Option<String>,
    pub grammar: Option<String>,
    pub key_points: Option<String>,
    pub improvement_areas: Option<String>,
}

impl AnalysisErrors {
    pub fn is_empty(&self) -> bool {
        self.sentiment.is_none()
            && self.clarity.is_none()
            && self.technical_accuracy.is_none()
            && self.audio.is_none()
            && self.keywords.is_none()
            && self.grammar.is_none()
            && self.key_points.is_none()
            && self.improvement_areas.is_none()
    }
}

/// Composite analysis report: one record per recorded response, immutable
/// once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: Uuid,
    pub transcription: String,
    pub prompt: String,
    pub sentiment_score: Option<f32>,
    pub clarity_score: Option<f32>,
    pub technical_accuracy: Option<f32>,
    pub confidence_metrics: ConfidenceMetrics,
    pub key_points: Option<Vec<String>>,
    pub improvement_areas: Option<Vec<String>>,
    pub detailed_analysis: DetailedAnalysis,
    pub errors: AnalysisErrors,
    pub created_at: DateTime<Utc>,
}
