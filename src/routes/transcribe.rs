//! Audio transcription endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;

const DEFAULT_CONFIDENCE: f64 = 0.95;

/// `POST /api/transcribe` — multipart form with an `audio` file part and an
/// `interviewId` text part. Transcribes the audio and stores the transcript
/// against the interview before responding.
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut audio: Option<Vec<u8>> = None;
    let mut interview_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read audio: {}", e)))?;
                audio = Some(bytes.to_vec());
            }
            "interviewId" => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read interviewId: {}", e))
                })?;
                interview_id = Some(value);
            }
            _ => {}
        }
    }

    let audio = audio
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("audio file is required".to_string()))?;
    let interview_id = interview_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("interviewId is required".to_string()))?;

    let text = state
        .hf
        .transcribe(&audio)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    // The transcript row is the durable artifact; a failed insert fails the
    // request rather than silently dropping the transcript.
    sqlx::query(
        r#"
        INSERT INTO transcriptions (id, interview_id, text_content, confidence_score)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&interview_id)
    .bind(&text)
    .bind(DEFAULT_CONFIDENCE)
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "text": text })))
}
