//! Composite analysis endpoint.

use axum::{extract::State, Json};
use base64::Engine;
use serde::Deserialize;

use crate::analysis::AnalysisRequest;
use crate::errors::{AppError, Result};
use crate::models::Analysis;
use crate::state::AppState;

/// Request body for `POST /api/analyze`. All fields are optional at the
/// serde layer so missing fields produce a 400 with a named field instead
/// of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub transcription: Option<String>,
    /// Base64-encoded audio bytes. Optional; audio-derived metrics degrade
    /// to null without it.
    pub audio: Option<String>,
    pub prompt: Option<String>,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<Analysis>> {
    // An empty transcription is still analyzable: the local analyzers fall
    // back and remote aspects short-circuit to empty slots. Only absent
    // fields are rejected.
    let transcription = body
        .transcription
        .ok_or_else(|| AppError::BadRequest("transcription is required".to_string()))?;
    let prompt = body
        .prompt
        .ok_or_else(|| AppError::BadRequest("prompt is required".to_string()))?;

    let audio = match body.audio {
        Some(encoded) => base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|_| AppError::BadRequest("audio must be valid base64".to_string()))?,
        None => Vec::new(),
    };

    if let Some(cached) = state.cache.get_analysis(&transcription, &prompt).await? {
        return Ok(Json(cached));
    }

    let request = AnalysisRequest {
        transcription,
        audio,
        prompt,
    };

    let report = state.orchestrator.analyze(&request).await;

    // Best-effort; a cache write failure never affects the response
    state.cache.put_analysis(&report);

    Ok(Json(report))
}
