//! Fan-out/join orchestration of the per-aspect analyzers.
//!
//! Every analyzer starts together and every outcome is collected; one slow or
//! failing remote call delays its siblings but never cancels them. Each
//! analyzer writes only its own pre-named slot, so assembly is deterministic
//! regardless of completion order.

use std::future::Future;

use chrono::Utc;
use uuid::Uuid;

use crate::ai::HfClient;
use crate::analysis::{aspects, text};
use crate::models::{
    Analysis, AnalysisErrors, AspectResult, ConfidenceMetrics, DetailedAnalysis,
};

/// Transient analysis input; never persisted as its own entity.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub transcription: String,
    pub audio: Vec<u8>,
    pub prompt: String,
}

/// Run one analyzer inside the isolation boundary.
///
/// A failure is logged and converted into `{data: None, error: label}`;
/// nothing propagates past this function, which is what lets a single
/// remote-service outage degrade one metric instead of the whole report.
pub async fn run_isolated<T, F>(label: &str, op: F) -> AspectResult<T>
where
    F: Future<Output = anyhow::Result<Option<T>>>,
{
    match op.await {
        Ok(Some(data)) => AspectResult::ok(data),
        Ok(None) => AspectResult::none(),
        Err(err) => {
            tracing::warn!(aspect = label, error = %err, "aspect analyzer failed");
            AspectResult::failed(label)
        }
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    hf: HfClient,
}

impl Orchestrator {
    pub fn new(hf: HfClient) -> Self {
        Self { hf }
    }

    /// Analyze one recorded response: fan out all remote aspects, run the
    /// local analyzers, join everything and assemble the composite report.
    ///
    /// This never fails; per-aspect failures surface as `null` slots with
    /// entries in the report's `errors` map.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Analysis {
        let transcription = request.transcription.as_str();
        let prompt = request.prompt.as_str();

        tracing::debug!(
            transcript_chars = transcription.len(),
            audio_bytes = request.audio.len(),
            "starting analysis fan-out"
        );

        let (sentiment, clarity, technical, audio, keywords, grammar, key_points, improvements) =
            tokio::join!(
                run_isolated(
                    "sentiment analysis failed",
                    aspects::sentiment(&self.hf, transcription),
                ),
                run_isolated(
                    "clarity analysis failed",
                    aspects::clarity(&self.hf, transcription),
                ),
                run_isolated(
                    "technical accuracy analysis failed",
                    aspects::technical_accuracy(&self.hf, transcription, prompt),
                ),
                run_isolated(
                    "audio analysis failed",
                    aspects::audio(&self.hf, transcription),
                ),
                run_isolated(
                    "keyword analysis failed",
                    aspects::keywords(&self.hf, transcription, prompt),
                ),
                run_isolated(
                    "grammar analysis failed",
                    aspects::grammar(&self.hf, transcription),
                ),
                run_isolated(
                    "key point extraction failed",
                    aspects::key_points(&self.hf, transcription, prompt),
                ),
                run_isolated(
                    "improvement area extraction failed",
                    aspects::improvement_areas(&self.hf, transcription, prompt),
                ),
            );

        // Local analyzers are pure and always populate their slots
        let sentence_complexity = text::sentence_complexity(transcription);
        let repetition = text::repetition(transcription);

        let errors = AnalysisErrors {
            sentiment: sentiment.error.clone(),
            clarity: clarity.error.clone(),
            technical_accuracy: technical.error.clone(),
            audio: audio.error.clone(),
            keywords: keywords.error.clone(),
            grammar: grammar.error.clone(),
            key_points: key_points.error.clone(),
            improvement_areas: improvements.error.clone(),
        };

        if !errors.is_empty() {
            tracing::warn!(?errors, "analysis completed with degraded aspects");
        }

        let confidence_metrics = ConfidenceMetrics {
            voice_modulation: audio.data.as_ref().and_then(|a| a.voice_modulation),
            pacing: audio.data.as_ref().and_then(|a| a.pacing),
            vocabulary: Some(repetition.repetition_score),
        };

        Analysis {
            id: Uuid::new_v4(),
            transcription: request.transcription.clone(),
            prompt: request.prompt.clone(),
            sentiment_score: sentiment.data,
            clarity_score: clarity.data,
            technical_accuracy: technical.data,
            confidence_metrics,
            key_points: key_points.data,
            improvement_areas: improvements.data,
            detailed_analysis: DetailedAnalysis {
                audio: audio.data,
                keywords: keywords.data,
                grammar: grammar.data,
                sentence_complexity,
                repetition,
            },
            errors,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn succeeding() -> anyhow::Result<Option<u32>> {
        Ok(Some(7))
    }

    async fn no_opinion() -> anyhow::Result<Option<u32>> {
        Ok(None)
    }

    async fn failing() -> anyhow::Result<Option<u32>> {
        anyhow::bail!("connection refused")
    }

    #[tokio::test]
    async fn test_run_isolated_success() {
        let result = run_isolated("label", succeeding()).await;
        assert_eq!(result.data, Some(7));
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_run_isolated_no_opinion() {
        let result = run_isolated("label", no_opinion()).await;
        assert_eq!(result.data, None);
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_run_isolated_converts_failure() {
        let result = run_isolated("sentiment analysis failed", failing()).await;
        assert_eq!(result.data, None);
        assert_eq!(result.error.as_deref(), Some("sentiment analysis failed"));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_siblings() {
        let (a, b, c) = tokio::join!(
            run_isolated("a failed", succeeding()),
            run_isolated("b failed", failing()),
            run_isolated("c failed", succeeding()),
        );
        assert_eq!(a.data, Some(7));
        assert_eq!(b.error.as_deref(), Some("b failed"));
        assert_eq!(c.data, Some(7));
    }
}
