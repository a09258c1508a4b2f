//! Structured coaching endpoint: narrative feedback plus a numeric
//! scorecard, graded and persisted per interview.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ai::ChatMessage;
use crate::coach;
use crate::errors::{AppError, Result};
use crate::models::grade_for;
use crate::state::AppState;

/// Wire names are mixed by the existing clients: `interviewId` is camelCase,
/// the keyword and duration fields are snake_case.
#[derive(Debug, Deserialize)]
pub struct StructuredAnalysisRequest {
    #[serde(rename = "interviewId")]
    pub interview_id: Option<String>,
    pub transcription: Option<String>,
    pub prompt: Option<String>,
    pub required_keywords: Option<Vec<String>>,
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAnalysisResponse {
    pub grammar: Option<f64>,
    pub sentence_complexity: Option<f64>,
    pub keywords: Option<f64>,
    pub filler_words_used: Option<f64>,
    pub repetition: Option<f64>,
    pub clarity: Option<f64>,
    pub confidence: Option<f64>,
    pub structure: Option<f64>,
    pub vocabulary: Option<f64>,
    pub overall_score: f64,
    pub ai_analysis: String,
}

pub async fn analyze_structured(
    State(state): State<AppState>,
    Json(body): Json<StructuredAnalysisRequest>,
) -> Result<Json<StructuredAnalysisResponse>> {
    let interview_id = body
        .interview_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("interviewId is required".to_string()))?;
    let transcription = body
        .transcription
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("transcription is required".to_string()))?;
    let prompt = body
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("prompt is required".to_string()))?;
    body.required_keywords
        .ok_or_else(|| AppError::BadRequest("required_keywords is required".to_string()))?;
    let duration = body
        .duration_seconds
        .ok_or_else(|| AppError::BadRequest("duration_seconds is required".to_string()))?;
    if duration <= 0.0 {
        return Err(AppError::BadRequest(
            "duration_seconds must be positive".to_string(),
        ));
    }

    // First pass: free-form coaching narrative
    let narrative = state
        .hf
        .chat_completion(vec![ChatMessage::user(coach::coach_prompt(
            &transcription,
            &prompt,
        ))])
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    // Second pass: compress the narrative into the fixed scorecard object
    let raw_summary = state
        .hf
        .chat_completion(vec![
            ChatMessage::system(coach::SUMMARY_SYSTEM_PROMPT),
            ChatMessage::user(coach::summary_prompt(&narrative)),
        ])
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let scores = coach::parse_summary(&raw_summary)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let overall = scores.overall.unwrap_or(0.0);
    let grade = grade_for(overall);

    // Scorecard persistence is mandatory; a failed insert fails the request
    sqlx::query(
        r#"
        INSERT INTO scorecards (
            interview_id, grammar, sentence_complexity, keywords,
            filler_words_used, repetition, clarity, confidence, structure,
            vocabulary, overall_score, grade, ai_coach_summary
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(&interview_id)
    .bind(scores.grammar)
    .bind(scores.sentence_complexity)
    .bind(scores.keywords)
    .bind(scores.filler_words_used)
    .bind(scores.repetition)
    .bind(scores.clarity)
    .bind(scores.confidence)
    .bind(scores.structure)
    .bind(scores.vocabulary)
    .bind(overall)
    .bind(grade)
    .bind(&narrative)
    .execute(&state.pool)
    .await?;

    tracing::info!(interview_id = %interview_id, overall, grade, "scorecard persisted");

    Ok(Json(StructuredAnalysisResponse {
        grammar: scores.grammar,
        sentence_complexity: scores.sentence_complexity,
        keywords: scores.keywords,
        filler_words_used: scores.filler_words_used,
        repetition: scores.repetition,
        clarity: scores.clarity,
        confidence: scores.confidence,
        structure: scores.structure,
        vocabulary: scores.vocabulary,
        overall_score: overall,
        ai_analysis: narrative,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_request_wire_names() {
        // The existing clients send interviewId camelCase but
        // required_keywords / duration_seconds snake_case
        let raw = r#"{
            "interviewId": "abc-123",
            "transcription": "I led a team.",
            "prompt": "Tell me about leadership.",
            "required_keywords": ["leadership", "team"],
            "duration_seconds": 92.5
        }"#;
        let request: StructuredAnalysisRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.interview_id.as_deref(), Some("abc-123"));
        assert_eq!(
            request.required_keywords,
            Some(vec!["leadership".to_string(), "team".to_string()])
        );
        assert_eq!(request.duration_seconds, Some(92.5));
    }

    #[test]
    fn test_structured_request_camel_case_variants_not_recognized() {
        let raw = r#"{"requiredKeywords": ["x"], "durationSeconds": 10}"#;
        let request: StructuredAnalysisRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.required_keywords, None);
        assert_eq!(request.duration_seconds, None);
    }

    #[test]
    fn test_structured_response_is_camel_case() {
        let response = StructuredAnalysisResponse {
            grammar: Some(7.0),
            sentence_complexity: Some(6.0),
            keywords: None,
            filler_words_used: None,
            repetition: None,
            clarity: None,
            confidence: None,
            structure: None,
            vocabulary: None,
            overall_score: 7.0,
            ai_analysis: "Strong answer.".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("sentenceComplexity").is_some());
        assert!(value.get("overallScore").is_some());
        assert!(value.get("aiAnalysis").is_some());
    }
}
