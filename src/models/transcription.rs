use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transcript derived from recorded audio. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transcription {
    pub id: Uuid,
    pub interview_id: String,
    pub text_content: String,
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
}
