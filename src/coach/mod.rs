//! LLM coach prompts and structured-summary parsing.
//!
//! The structured flow makes two chat-completion calls: one free-form
//! coaching narrative, then a second pass that compresses the narrative into
//! a JSON scorecard. The scorecard parse fails closed; a model that ignores
//! the JSON-only instruction produces a request-level error, not a bogus row.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analysis::aspects::strip_code_fences;

pub const SUMMARY_SYSTEM_PROMPT: &str =
    "Return only a JSON object, No explanations, no markdown, no additional text.";

/// Free-form coaching critique of one answer.
pub fn coach_prompt(transcription: &str, question: &str) -> String {
    format!(
        r#"You are an expert interview coach. Analyze this interview response and provide constructive feedback.

The candidate has been asked the following question:
{question}

Transcription:
"{transcription}"

Please provide feedback regarding the candidate's response in the following format:

**Overall Performance:** [Rate 1-10 and brief summary]

**Strengths:**
- [List 2-3 specific strengths]

**Areas for Improvement:**
- [List 2-3 specific areas to work on]

**Specific Suggestions:**
- [Provide 3-4 actionable tips]

**Communication Quality:**
- Clarity: [Score/10]
- Confidence: [Score/10]
- Structure: [Score/10]

**Key Advice:**
[One paragraph of the most important advice for this candidate]

Keep feedback constructive, specific, and actionable. Focus on both content and delivery."#
    )
}

/// Second pass: compress the narrative into the fixed scorecard object.
pub fn summary_prompt(narrative: &str) -> String {
    format!(
        r#"Summarize the following interview feedback as a JSON object with exactly these keys,
each a number from 0 to 10: "Grammar", "Sentence Complexity", "Keywords", "Filler Words Used",
"Repetition", "Clarity", "Confidence", "Structure", "Vocabulary", "Overall".

Feedback:
{narrative}"#
    )
}

/// Scorecard object the summarization model returns. Dimensions the model
/// omitted deserialize as None and persist as NULL.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryScores {
    #[serde(rename = "Grammar")]
    pub grammar: Option<f64>,
    #[serde(rename = "Sentence Complexity")]
    pub sentence_complexity: Option<f64>,
    #[serde(rename = "Keywords")]
    pub keywords: Option<f64>,
    #[serde(rename = "Filler Words Used")]
    pub filler_words_used: Option<f64>,
    #[serde(rename = "Repetition")]
    pub repetition: Option<f64>,
    #[serde(rename = "Clarity")]
    pub clarity: Option<f64>,
    #[serde(rename = "Confidence")]
    pub confidence: Option<f64>,
    #[serde(rename = "Structure")]
    pub structure: Option<f64>,
    #[serde(rename = "Vocabulary")]
    pub vocabulary: Option<f64>,
    #[serde(rename = "Overall")]
    pub overall: Option<f64>,
}

/// Parse the summarization model's output, tolerating markdown fences.
pub fn parse_summary(raw: &str) -> Result<SummaryScores> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned).context("Model summary was not the expected JSON object")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_full_object() {
        let raw = r#"{
            "Grammar": 7, "Sentence Complexity": 6, "Keywords": 8,
            "Filler Words Used": 5, "Repetition": 7, "Clarity": 8,
            "Confidence": 6, "Structure": 7, "Vocabulary": 8, "Overall": 7
        }"#;
        let scores = parse_summary(raw).unwrap();
        assert_eq!(scores.grammar, Some(7.0));
        assert_eq!(scores.filler_words_used, Some(5.0));
        assert_eq!(scores.overall, Some(7.0));
    }

    #[test]
    fn test_parse_summary_tolerates_fences_and_gaps() {
        let raw = "```json\n{\"Overall\": 8.5, \"Clarity\": 9}\n```";
        let scores = parse_summary(raw).unwrap();
        assert_eq!(scores.overall, Some(8.5));
        assert_eq!(scores.clarity, Some(9.0));
        assert_eq!(scores.grammar, None);
    }

    #[test]
    fn test_parse_summary_fails_closed_on_prose() {
        assert!(parse_summary("Overall this was a strong answer.").is_err());
    }

    #[test]
    fn test_prompts_embed_inputs() {
        let prompt = coach_prompt("I led a team.", "Tell me about leadership.");
        assert!(prompt.contains("I led a team."));
        assert!(prompt.contains("Tell me about leadership."));

        let summary = summary_prompt("**Overall Performance:** 7");
        assert!(summary.contains("**Overall Performance:** 7"));
        assert!(summary.contains("\"Overall\""));
    }
}
