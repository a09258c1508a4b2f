//! Per-aspect remote analyzers.
//!
//! Each analyzer makes one call against a fixed candidate-label set (or one
//! generation/completion call) and maps the response to its payload through
//! a deterministic rule. A missing target label yields `None`, never an
//! error; transport and malformed-payload failures return `Err` and are
//! isolated by the execution wrapper upstream.

use anyhow::{Context, Result};

use crate::ai::{ChatMessage, HfClient};
use crate::analysis::text;
use crate::models::{AudioAnalysis, GrammarAnalysis, GrammarError, KeywordAnalysis};

const CLARITY_LABELS: [&str; 3] = ["clear and concise", "unclear and verbose", "moderately clear"];
const ACCURACY_LABELS: [&str; 3] = [
    "technically accurate",
    "partially accurate",
    "technically inaccurate",
];
const DELIVERY_LABELS: [&str; 3] = [
    "expressive and varied delivery",
    "well paced delivery",
    "fluent and confident delivery",
];

/// Sentences with a Jaccard overlap below this against their best corrected
/// match are reported as grammar errors.
const GRAMMAR_MATCH_THRESHOLD: f32 = 0.8;

/// Keywords whose entailment score clears this are considered covered.
const KEYWORD_MATCH_THRESHOLD: f32 = 0.5;

/// Positive-sentiment score of the response, from the POS/NEU/NEG classifier.
pub async fn sentiment(hf: &HfClient, transcription: &str) -> Result<Option<f32>> {
    if transcription.trim().is_empty() {
        return Ok(None);
    }

    let scores = hf.classify(transcription).await?;
    Ok(scores.iter().find(|ls| ls.label == "POS").map(|ls| ls.score))
}

/// Clarity score: zero-shot confidence that the response is clear and concise.
pub async fn clarity(hf: &HfClient, transcription: &str) -> Result<Option<f32>> {
    if transcription.trim().is_empty() {
        return Ok(None);
    }

    let outcome = hf.zero_shot(transcription, &CLARITY_LABELS, false).await?;
    Ok(outcome.score_for(CLARITY_LABELS[0]))
}

/// Technical accuracy of the answer judged against the prompt.
pub async fn technical_accuracy(
    hf: &HfClient,
    transcription: &str,
    prompt: &str,
) -> Result<Option<f32>> {
    if transcription.trim().is_empty() {
        return Ok(None);
    }

    let input = format!("Question: {}\nAnswer: {}", prompt, transcription);
    let outcome = hf.zero_shot(&input, &ACCURACY_LABELS, false).await?;
    Ok(outcome.score_for(ACCURACY_LABELS[0]))
}

/// Delivery metrics: one multi-label zero-shot call for modulation, pacing
/// and fluency, plus the local filler-word scan.
pub async fn audio(hf: &HfClient, transcription: &str) -> Result<Option<AudioAnalysis>> {
    let (filler_word_count, filler_words) = text::filler_words(transcription);

    if transcription.trim().is_empty() {
        return Ok(Some(AudioAnalysis {
            voice_modulation: None,
            pacing: None,
            fluency: None,
            filler_word_count,
            filler_words,
        }));
    }

    let outcome = hf.zero_shot(transcription, &DELIVERY_LABELS, true).await?;

    Ok(Some(AudioAnalysis {
        voice_modulation: outcome.score_for(DELIVERY_LABELS[0]),
        pacing: outcome.score_for(DELIVERY_LABELS[1]),
        fluency: outcome.score_for(DELIVERY_LABELS[2]),
        filler_word_count,
        filler_words,
    }))
}

/// Keyword coverage: expected keywords extracted from the prompt, matched via
/// multi-label entailment against the response.
pub async fn keywords(
    hf: &HfClient,
    transcription: &str,
    prompt: &str,
) -> Result<Option<KeywordAnalysis>> {
    let candidates = keywords_from_prompt(prompt);

    if candidates.is_empty() || transcription.trim().is_empty() {
        return Ok(Some(KeywordAnalysis {
            matched_keywords: Vec::new(),
            missing_keywords: candidates,
            relevance_score: None,
        }));
    }

    let labels: Vec<&str> = candidates.iter().map(String::as_str).collect();
    let outcome = hf.zero_shot(transcription, &labels, true).await?;

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut matched_scores = Vec::new();

    for keyword in &candidates {
        match outcome.score_for(keyword) {
            Some(score) if score > KEYWORD_MATCH_THRESHOLD => {
                matched.push(keyword.clone());
                matched_scores.push(score);
            }
            _ => missing.push(keyword.clone()),
        }
    }

    let relevance_score = if matched_scores.is_empty() {
        None
    } else {
        Some(matched_scores.iter().sum::<f32>() / matched_scores.len() as f32)
    };

    Ok(Some(KeywordAnalysis {
        matched_keywords: matched,
        missing_keywords: missing,
        relevance_score,
    }))
}

/// Grammar check: one remote correction pass, then a local sentence-level
/// diff between the original and corrected text.
pub async fn grammar(hf: &HfClient, transcription: &str) -> Result<Option<GrammarAnalysis>> {
    if transcription.trim().is_empty() {
        return Ok(None);
    }

    let corrected = hf.correct_text(transcription).await?;
    Ok(Some(diff_grammar(transcription, &corrected)))
}

/// Key points the LLM identified in the response.
pub async fn key_points(
    hf: &HfClient,
    transcription: &str,
    prompt: &str,
) -> Result<Option<Vec<String>>> {
    if transcription.trim().is_empty() {
        return Ok(None);
    }

    let instruction = format!(
        "List the 3-5 key points this interview answer makes in response to the question.\n\
         Question: \"{}\"\nAnswer: \"{}\"",
        prompt, transcription
    );
    string_list_completion(hf, &instruction).await.map(Some)
}

/// Concrete areas the candidate should improve, from the LLM.
pub async fn improvement_areas(
    hf: &HfClient,
    transcription: &str,
    prompt: &str,
) -> Result<Option<Vec<String>>> {
    if transcription.trim().is_empty() {
        return Ok(None);
    }

    let instruction = format!(
        "List the 3-5 most important areas for improvement in this interview answer.\n\
         Question: \"{}\"\nAnswer: \"{}\"",
        prompt, transcription
    );
    string_list_completion(hf, &instruction).await.map(Some)
}

async fn string_list_completion(hf: &HfClient, instruction: &str) -> Result<Vec<String>> {
    let messages = vec![
        ChatMessage::system(
            "Return only a JSON array of short strings. No explanations, no markdown, no additional text.",
        ),
        ChatMessage::user(instruction.to_string()),
    ];

    let raw = hf.chat_completion(messages).await?;
    parse_string_list(&raw)
}

/// Parse a model-produced JSON string array, tolerating markdown fences.
/// Anything else fails closed as a parse error.
pub fn parse_string_list(raw: &str) -> Result<Vec<String>> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned).context("Model output was not a JSON string array")
}

/// Strip a surrounding markdown code fence, if present.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag after the opening fence
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Compare original and corrected text sentence by sentence. Each original
/// sentence is matched to its closest corrected sentence by Jaccard word
/// overlap; weak matches become error entries.
pub fn diff_grammar(original: &str, corrected: &str) -> GrammarAnalysis {
    let mut orig_sentences = text::split_sentences(original);
    let mut corr_sentences = text::split_sentences(corrected);

    // Unterminated text is still checkable as a single unit
    if orig_sentences.is_empty() {
        orig_sentences = vec![original.trim()];
    }
    if corr_sentences.is_empty() {
        corr_sentences = vec![corrected.trim()];
    }

    let mut errors = Vec::new();

    for orig in &orig_sentences {
        let (best, score) = corr_sentences
            .iter()
            .map(|corr| (*corr, jaccard(orig, corr)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or(("", 0.0));

        if score < GRAMMAR_MATCH_THRESHOLD && *orig != best {
            errors.push(GrammarError {
                kind: "grammar".to_string(),
                suggestion: best.to_string(),
                context: format!("Jaccard similarity: {:.2}", score),
            });
        }
    }

    let total = orig_sentences.len() as f32;
    let score = (1.0 - errors.len() as f32 / total).clamp(0.0, 1.0);

    GrammarAnalysis {
        error_count: Some(errors.len() as u32),
        errors,
        score: Some(score),
    }
}

fn jaccard(a: &str, b: &str) -> f32 {
    let set_a: std::collections::HashSet<&str> = a.split_whitespace().collect();
    let set_b: std::collections::HashSet<&str> = b.split_whitespace().collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    set_a.intersection(&set_b).count() as f32 / union as f32
}

/// Derive candidate keywords from the prompt: distinct words of 5+ letters,
/// minus interview-prompt boilerplate, capped at 8 in prompt order.
pub fn keywords_from_prompt(prompt: &str) -> Vec<String> {
    const BOILERPLATE: [&str; 10] = [
        "about", "could", "should", "would", "describe", "explain", "their", "there", "which",
        "where",
    ];

    let mut seen = std::collections::HashSet::new();
    let mut keywords = Vec::new();

    for word in prompt.split_whitespace() {
        let normalized = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if normalized.chars().count() < 5 || BOILERPLATE.contains(&normalized.as_str()) {
            continue;
        }
        if seen.insert(normalized.clone()) {
            keywords.push(normalized);
        }
        if keywords.len() == 8 {
            break;
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_from_prompt() {
        let keywords = keywords_from_prompt("Describe a time you used Kubernetes to scale a production service");
        assert_eq!(keywords, vec!["kubernetes", "scale", "production", "service"]);
    }

    #[test]
    fn test_keywords_from_prompt_dedups_and_caps() {
        let keywords = keywords_from_prompt(
            "metrics metrics alerts alerts tracing logging deploys rollouts canary sharding extra",
        );
        assert_eq!(keywords.len(), 8);
        assert_eq!(keywords[0], "metrics");
        assert!(!keywords.contains(&"extra".to_string()));
    }

    #[test]
    fn test_parse_string_list_plain() {
        let list = parse_string_list(r#"["one", "two"]"#).unwrap();
        assert_eq!(list, vec!["one", "two"]);
    }

    #[test]
    fn test_parse_string_list_fenced() {
        let raw = "```json\n[\"led a team\", \"shipped early\"]\n```";
        let list = parse_string_list(raw).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_parse_string_list_fails_closed() {
        assert!(parse_string_list("The key points are: teamwork").is_err());
        assert!(parse_string_list(r#"{"points": []}"#).is_err());
    }

    #[test]
    fn test_diff_grammar_identical_text() {
        let analysis = diff_grammar("I led the team. We shipped.", "I led the team. We shipped.");
        assert_eq!(analysis.error_count, Some(0));
        assert_eq!(analysis.score, Some(1.0));
        assert!(analysis.errors.is_empty());
    }

    #[test]
    fn test_diff_grammar_reports_weak_matches() {
        let analysis = diff_grammar(
            "Him and me done the project.",
            "He and I did the project.",
        );
        assert_eq!(analysis.error_count, Some(1));
        let error = &analysis.errors[0];
        assert_eq!(error.kind, "grammar");
        assert_eq!(error.suggestion, "He and I did the project");
        assert_eq!(analysis.score, Some(0.0));
    }

    #[test]
    fn test_diff_grammar_handles_unterminated_text() {
        let analysis = diff_grammar("we was ready", "we were ready");
        assert_eq!(analysis.error_count, Some(1));
    }
}
