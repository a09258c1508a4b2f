//! Pure text analyzers: sentence complexity and repetition.
//!
//! These run locally with no remote calls and are deterministic for a given
//! transcript, so they always populate their slots in the composite report.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{RepeatedWord, RepetitionAnalysis, SentenceComplexity};

/// Connectives that mark a sentence as complex
const CONNECTIVES: [&str; 6] = [
    "because", "although", "while", "unless", "despite", "however",
];

/// Filler lexicon for delivery analysis. Matched against individual
/// lowercased tokens.
const FILLER_WORDS: [&str; 17] = [
    "um", "uh", "ah", "er", "like", "basically", "actually", "literally", "honestly", "maybe",
    "perhaps", "well", "so", "right", "okay", "anyway", "anyhow",
];

/// Split a transcript into sentences delimited by terminal punctuation.
///
/// Only terminated segments count as sentences; a trailing run of text with
/// no `.`/`!`/`?` is not one. Consecutive terminators collapse.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let segment = text[start..idx].trim();
            if !segment.is_empty() {
                sentences.push(segment);
            }
            start = idx + ch.len_utf8();
        }
    }

    sentences
}

/// Sentence-complexity metrics over the transcript.
///
/// A sentence is complex if it runs past 20 words, contains `;` or `:`, or
/// uses a subordinating connective. Zero sentences yields the fixed fallback
/// (complexityScore 0.5) rather than dividing by zero.
pub fn sentence_complexity(text: &str) -> SentenceComplexity {
    let sentences = split_sentences(text);

    if sentences.is_empty() {
        return SentenceComplexity {
            average_length: 0.0,
            complexity_score: 0.5,
            complex_sentences: 0,
            simple_sentences: 0,
        };
    }

    let mut complex = 0u32;
    let mut total_words = 0usize;

    for sentence in &sentences {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        total_words += words.len();

        let has_connective = words.iter().any(|word| {
            let normalized = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            CONNECTIVES.contains(&normalized.as_str())
        });

        if words.len() > 20 || sentence.contains(';') || sentence.contains(':') || has_connective {
            complex += 1;
        }
    }

    let total = sentences.len() as u32;

    SentenceComplexity {
        average_length: total_words as f32 / total as f32,
        complexity_score: complex as f32 / total as f32,
        complex_sentences: complex,
        simple_sentences: total - complex,
    }
}

/// Word-repetition metrics over the transcript.
///
/// Tokens come from whitespace splitting, lowercased; tokens shorter than 4
/// characters are ignored. A token counted more than twice is repeated, and
/// every sentence containing it is recorded. repetitionScore is the ratio of
/// unique to total counted tokens (0 for an empty transcript).
pub fn repetition(text: &str) -> RepetitionAnalysis {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() >= 4)
        .collect();

    if tokens.is_empty() {
        return RepetitionAnalysis {
            repeated_words: Vec::new(),
            repetition_score: 0.0,
        };
    }

    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for token in &tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let sentences = split_sentences(text);

    let repeated_words = counts
        .iter()
        .filter(|(_, &count)| count > 2)
        .map(|(&word, &count)| RepeatedWord {
            word: word.to_string(),
            count,
            sentences: sentences
                .iter()
                .filter(|s| s.split_whitespace().any(|t| t.to_lowercase() == word))
                .map(|s| s.to_string())
                .collect(),
        })
        .collect();

    RepetitionAnalysis {
        repeated_words,
        repetition_score: counts.len() as f32 / tokens.len() as f32,
    }
}

/// Count filler-word occurrences and collect the distinct fillers used.
pub fn filler_words(text: &str) -> (u32, Vec<String>) {
    let mut count = 0u32;
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for word in text.split_whitespace() {
        let normalized = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if FILLER_WORDS.contains(&normalized.as_str()) {
            count += 1;
            seen.insert(normalized);
        }
    }

    (count, seen.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_unterminated_tail() {
        assert_eq!(split_sentences("First one. Second one"), vec!["First one"]);
        assert!(split_sentences("no terminator at all").is_empty());
        assert_eq!(split_sentences("Really?! Yes."), vec!["Really", "Yes"]);
    }

    #[test]
    fn test_complexity_fallback_without_terminators() {
        let result = sentence_complexity("this text never ends");
        assert_eq!(result.average_length, 0.0);
        assert_eq!(result.complexity_score, 0.5);
        assert_eq!(result.complex_sentences, 0);
        assert_eq!(result.simple_sentences, 0);
    }

    #[test]
    fn test_complexity_fallback_on_empty_input() {
        let result = sentence_complexity("");
        assert_eq!(result.complexity_score, 0.5);
        assert!(!result.complexity_score.is_nan());
    }

    #[test]
    fn test_connective_marks_sentence_complex() {
        let text =
            "I led a team of four to deliver the project two weeks early, because we re-prioritized daily.";
        let result = sentence_complexity(text);
        assert_eq!(result.complex_sentences + result.simple_sentences, 1);
        assert_eq!(result.complexity_score, 1.0);
    }

    #[test]
    fn test_long_and_punctuated_sentences_are_complex() {
        let long = format!("{}.", vec!["word"; 21].join(" "));
        assert_eq!(sentence_complexity(&long).complex_sentences, 1);

        let result = sentence_complexity("First: a list. Short one. He left; she stayed.");
        assert_eq!(result.complex_sentences, 2);
        assert_eq!(result.simple_sentences, 1);
    }

    #[test]
    fn test_repetition_threshold() {
        // "project" appears 3 times, "early" twice
        let text = "The project went well. The project shipped. The project was early. We were early.";
        let result = repetition(text);

        let repeated: Vec<&str> = result
            .repeated_words
            .iter()
            .map(|r| r.word.as_str())
            .collect();
        assert!(repeated.contains(&"project"));
        assert!(!repeated.contains(&"early"));

        let project = result
            .repeated_words
            .iter()
            .find(|r| r.word == "project")
            .unwrap();
        assert_eq!(project.count, 3);
        assert_eq!(project.sentences.len(), 3);
    }

    #[test]
    fn test_repetition_score_is_unique_over_total() {
        let text = "alpha beta alpha gamma";
        let result = repetition(text);
        // 3 unique of 4 counted tokens
        assert!((result.repetition_score - 0.75).abs() < f32::EPSILON);
        assert!(result.repetition_score > 0.0 && result.repetition_score <= 1.0);
    }

    #[test]
    fn test_repetition_ignores_short_tokens() {
        let result = repetition("a an the to of in");
        assert_eq!(result.repetition_score, 0.0);
        assert!(result.repeated_words.is_empty());
    }

    #[test]
    fn test_local_analyzers_are_idempotent() {
        let text = "We scaled the service. We scaled the team, because growth demanded it.";
        assert_eq!(sentence_complexity(text), sentence_complexity(text));
        assert_eq!(repetition(text), repetition(text));
    }

    #[test]
    fn test_filler_word_extraction() {
        let (count, words) = filler_words("Um, I was like basically done, um, yeah.");
        assert_eq!(count, 4);
        assert_eq!(words, vec!["basically", "like", "um"]);
    }

    #[test]
    fn test_filler_words_empty_text() {
        let (count, words) = filler_words("");
        assert_eq!(count, 0);
        assert!(words.is_empty());
    }
}
