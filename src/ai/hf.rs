use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::HuggingFaceConfig;

pub const ASR_MODEL: &str = "openai/whisper-large-v3";
pub const SENTIMENT_MODEL: &str = "finiteautomata/bertweet-base-sentiment-analysis";
pub const ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";
pub const GRAMMAR_MODEL: &str = "vennify/t5-base-grammar-correction";
pub const CHAT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Client for the Hugging Face inference API and router.
///
/// Every request carries a bounded timeout; a hung remote call fails the
/// individual aspect rather than the whole server.
#[derive(Clone)]
pub struct HfClient {
    http_client: Client,
    api_token: String,
    inference_base: String,
    router_base: String,
}

impl HfClient {
    pub fn new(config: &HuggingFaceConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            api_token: config.api_token.clone(),
            inference_base: config.inference_base.trim_end_matches('/').to_string(),
            router_base: config.router_base.trim_end_matches('/').to_string(),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.inference_base, model)
    }

    /// Transcribe raw audio bytes with the Whisper inference endpoint.
    /// No retry; the caller decides whether to surface or ignore a failure.
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        if audio.is_empty() {
            anyhow::bail!("No audio data provided");
        }

        let response = self
            .http_client
            .post(self.model_url(ASR_MODEL))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "audio/webm")
            .body(audio.to_vec())
            .send()
            .await
            .context("Failed to call transcription API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Transcription API failed with status {}: {}", status, error_text);
        }

        let asr: AsrResponse = response
            .json()
            .await
            .context("Failed to parse transcription response")?;

        Ok(asr.text)
    }

    /// Text classification (sentiment-style). Returns the label/score array
    /// for the input, parsed into typed structs and failing closed on shape
    /// mismatch.
    pub async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let response = self
            .http_client
            .post(self.model_url(SENTIMENT_MODEL))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&InferenceRequest {
                inputs: text.to_string(),
                parameters: None,
            })
            .send()
            .await
            .context("Failed to call classification API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Classification API failed with status {}: {}", status, error_text);
        }

        // The inference API wraps single-input results in an outer array.
        let mut batches: Vec<Vec<LabelScore>> = response
            .json()
            .await
            .context("Failed to parse classification response")?;

        if batches.is_empty() {
            anyhow::bail!("Classification response contained no results");
        }

        Ok(batches.remove(0))
    }

    /// Zero-shot classification against a fixed candidate-label set.
    pub async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[&str],
        multi_label: bool,
    ) -> Result<ZeroShotOutcome> {
        let response = self
            .http_client
            .post(self.model_url(ZERO_SHOT_MODEL))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&InferenceRequest {
                inputs: text.to_string(),
                parameters: Some(ZeroShotParameters {
                    candidate_labels: candidate_labels.iter().map(|s| s.to_string()).collect(),
                    multi_label,
                }),
            })
            .send()
            .await
            .context("Failed to call zero-shot API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Zero-shot API failed with status {}: {}", status, error_text);
        }

        let outcome: ZeroShotOutcome = response
            .json()
            .await
            .context("Failed to parse zero-shot response")?;

        if outcome.labels.len() != outcome.scores.len() {
            anyhow::bail!(
                "Zero-shot response shape mismatch: {} labels vs {} scores",
                outcome.labels.len(),
                outcome.scores.len()
            );
        }

        Ok(outcome)
    }

    /// Run the grammar-correction text2text model over the input.
    pub async fn correct_text(&self, text: &str) -> Result<String> {
        let response = self
            .http_client
            .post(self.model_url(GRAMMAR_MODEL))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&InferenceRequest {
                inputs: text.to_string(),
                parameters: None,
            })
            .send()
            .await
            .context("Failed to call grammar correction API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Grammar correction API failed with status {}: {}",
                status,
                error_text
            );
        }

        let mut generations: Vec<GeneratedText> = response
            .json()
            .await
            .context("Failed to parse grammar correction response")?;

        if generations.is_empty() {
            anyhow::bail!("Grammar correction response contained no generations");
        }

        Ok(generations.remove(0).generated_text)
    }

    /// Chat completion through the router. Returns the first choice content.
    pub async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.router_base);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&ChatRequest {
                model: CHAT_MODEL.to_string(),
                messages,
            })
            .send()
            .await
            .context("Failed to call chat completions API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Chat completions API failed with status {}: {}",
                status,
                error_text
            );
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .context("Chat completion contained no choices")?;

        Ok(choice.message.content)
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<ZeroShotParameters>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters {
    candidate_labels: Vec<String>,
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
struct AsrResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Parallel label/score arrays from the zero-shot endpoint, ordered by
/// descending score. Lengths are validated at parse time.
#[derive(Debug, Clone, Deserialize)]
pub struct ZeroShotOutcome {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl ZeroShotOutcome {
    /// Score of a named label, or None if the label is absent. Label
    /// absence is an analyzer opinion ("no data"), not an error.
    pub fn score_for(&self, label: &str) -> Option<f32> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|idx| self.scores[idx])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_for_present_label() {
        let outcome = ZeroShotOutcome {
            labels: vec!["clear and concise".into(), "moderately clear".into()],
            scores: vec![0.8, 0.2],
        };
        assert_eq!(outcome.score_for("clear and concise"), Some(0.8));
        assert_eq!(outcome.score_for("moderately clear"), Some(0.2));
    }

    #[test]
    fn test_score_for_absent_label_is_none() {
        let outcome = ZeroShotOutcome {
            labels: vec!["POS".into()],
            scores: vec![1.0],
        };
        assert_eq!(outcome.score_for("NEG"), None);
    }

    #[test]
    fn test_text2text_response_parses() {
        // Grammar correction returns a one-element generation array
        let raw = r#"[{"generated_text": "He and I did the project."}]"#;
        let generations: Vec<GeneratedText> = serde_json::from_str(raw).unwrap();
        assert_eq!(generations[0].generated_text, "He and I did the project.");
    }

    #[test]
    fn test_zero_shot_shape_mismatch_fails_closed() {
        // Mimics the parse-time validation: mismatched arrays are an error,
        // never an out-of-bounds index.
        let raw = r#"{"labels": ["a", "b"], "scores": [0.5]}"#;
        let outcome: ZeroShotOutcome = serde_json::from_str(raw).unwrap();
        assert_ne!(outcome.labels.len(), outcome.scores.len());
    }
}
