use sha2::{Digest, Sha256};

pub struct CacheKey;

impl CacheKey {
    /// Key for a cached composite report, derived from the exact
    /// (transcription, prompt) pair.
    pub fn analysis(transcription: &str, prompt: &str) -> String {
        let combined = format!("{}\u{1f}{}", transcription, prompt);
        let hash = Self::hash(&combined);
        format!("analysis:v1:{}", hash)
    }

    fn hash(input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_cache_key_shape() {
        let key = CacheKey::analysis("I led a team of four.", "Tell me about a success.");
        assert!(key.starts_with("analysis:v1:"));
        assert_eq!(key.len(), "analysis:v1:".len() + 64); // SHA256 = 64 hex chars
    }

    #[test]
    fn test_cache_key_consistency() {
        let key1 = CacheKey::analysis("same text", "same prompt");
        let key2 = CacheKey::analysis("same text", "same prompt");
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_separates_fields() {
        // ("ab", "c") and ("a", "bc") must not collide
        let key1 = CacheKey::analysis("ab", "c");
        let key2 = CacheKey::analysis("a", "bc");
        assert_ne!(key1, key2);
    }
}
