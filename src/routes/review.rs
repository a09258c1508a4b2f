//! Review endpoints: fetch what previous runs persisted for an interview.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{AppError, Result};
use crate::models::{Scorecard, Transcription};
use crate::state::AppState;

/// Latest scorecard for an interview.
pub async fn get_scorecard(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<Scorecard>> {
    let scorecard: Option<Scorecard> = sqlx::query_as(
        r#"
        SELECT id, interview_id, grammar, sentence_complexity, keywords,
               filler_words_used, repetition, clarity, confidence, structure,
               vocabulary, overall_score, grade, ai_coach_summary, created_at
        FROM scorecards
        WHERE interview_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(&interview_id)
    .fetch_optional(&state.pool)
    .await?;

    match scorecard {
        Some(scorecard) => Ok(Json(scorecard)),
        None => Err(AppError::NotFound(format!(
            "No scorecard for interview {}",
            interview_id
        ))),
    }
}

/// Latest transcription for an interview.
pub async fn get_transcription(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<Transcription>> {
    let transcription: Option<Transcription> = sqlx::query_as(
        r#"
        SELECT id, interview_id, text_content, confidence_score, created_at
        FROM transcriptions
        WHERE interview_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(&interview_id)
    .fetch_optional(&state.pool)
    .await?;

    match transcription {
        Some(transcription) => Ok(Json(transcription)),
        None => Err(AppError::NotFound(format!(
            "No transcription for interview {}",
            interview_id
        ))),
    }
}
