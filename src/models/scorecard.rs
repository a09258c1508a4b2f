use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Normalized per-interview scorecard persisted by the LLM-coach flow.
/// Scores are 0-10 per dimension; any the model omitted stay NULL.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Scorecard {
    pub id: Uuid,
    pub interview_id: String,
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
    pub grade: String,
    pub ai_coach_summary: String,
    pub created_at: DateTime<Utc>,
}

/// Bucket an overall score into a letter grade.
pub fn grade_for(overall: f64) -> &'static str {
    if overall >= 8.0 {
        "Excellent"
    } else if overall >= 6.0 {
        "Good"
    } else if overall >= 4.0 {
        "Average"
    } else if overall >= 2.0 {
        "Poor"
    } else {
        "Failed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade_for(8.0), "Excellent");
        assert_eq!(grade_for(7.99), "Good");
        assert_eq!(grade_for(6.0), "Good");
        assert_eq!(grade_for(4.0), "Average");
        assert_eq!(grade_for(2.0), "Poor");
        assert_eq!(grade_for(1.9), "Failed");
        assert_eq!(grade_for(0.0), "Failed");
        assert_eq!(grade_for(10.0), "Excellent");
    }
}
