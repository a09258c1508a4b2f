use anyhow::Result;
use uuid::Uuid;

use crate::cache::CacheKey;
use crate::config::CacheConfig;
use crate::db::DbPool;
use crate::models::Analysis;

/// Result cache for composite analysis reports, keyed by
/// (transcription, prompt).
///
/// Reads pick the most recent row, so duplicate inserts from concurrent
/// requests are tolerated. Writes are insert-only and best-effort; a failed
/// cache write never fails the analysis response. Disabled by default.
#[derive(Clone)]
pub struct CacheService {
    pool: DbPool,
    config: CacheConfig,
}

impl CacheService {
    pub fn new(pool: DbPool, config: CacheConfig) -> Self {
        Self { pool, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Look up a cached report. Lookup errors degrade to a miss.
    pub async fn get_analysis(&self, transcription: &str, prompt: &str) -> Result<Option<Analysis>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let key = CacheKey::analysis(transcription, prompt);

        let row: Option<(serde_json::Value,)> = sqlx::query_as(
            r#"
            SELECT analysis FROM cached_analysis
            WHERE cache_key = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(&key)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to read analysis cache: {}", e);
            None
        });

        match row {
            Some((value,)) => match serde_json::from_value::<Analysis>(value) {
                Ok(analysis) => {
                    tracing::debug!("Cache HIT for analysis");
                    Ok(Some(analysis))
                }
                Err(e) => {
                    tracing::warn!("Cached analysis failed to deserialize: {}", e);
                    Ok(None)
                }
            },
            None => {
                tracing::debug!("Cache MISS for analysis");
                Ok(None)
            }
        }
    }

    /// Store a report, fire-and-forget. Insert-only: existing rows for the
    /// same key are left in place and superseded by recency on read.
    pub fn put_analysis(&self, analysis: &Analysis) {
        if !self.config.enabled {
            return;
        }

        let key = CacheKey::analysis(&analysis.transcription, &analysis.prompt);
        let pool = self.pool.clone();
        let transcription = analysis.transcription.clone();
        let prompt = analysis.prompt.clone();
        let payload = match serde_json::to_value(analysis) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to serialize analysis for cache: {}", e);
                return;
            }
        };

        tokio::spawn(async move {
            let result = sqlx::query(
                r#"
                INSERT INTO cached_analysis (id, cache_key, transcription, prompt, analysis)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&key)
            .bind(&transcription)
            .bind(&prompt)
            .bind(&payload)
            .execute(&pool)
            .await;

            if let Err(e) = result {
                tracing::warn!("Failed to write analysis cache: {}", e);
            }
        });
    }
}
