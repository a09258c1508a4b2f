// Integration test for the analysis fan-out under a full remote outage.
//
// The client points at an unroutable local port so every remote aspect fails
// fast; the composite report must still come back with the local metrics
// populated and one error entry per remote aspect.
use interview_api::ai::HfClient;
use interview_api::analysis::{AnalysisRequest, Orchestrator};
use interview_api::config::HuggingFaceConfig;

fn unreachable_client() -> HfClient {
    let config = HuggingFaceConfig {
        api_token: "test-token".to_string(),
        inference_base: "http://127.0.0.1:9".to_string(),
        router_base: "http://127.0.0.1:9".to_string(),
        request_timeout_seconds: 1,
    };
    HfClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn test_remote_outage_degrades_per_aspect() {
    let orchestrator = Orchestrator::new(unreachable_client());
    let request = AnalysisRequest {
        transcription:
            "I designed the pipeline because it scaled well. It shipped on time. Um, mostly."
                .to_string(),
        audio: Vec::new(),
        prompt: "Tell me about a project you are proud of.".to_string(),
    };

    let report = orchestrator.analyze(&request).await;

    // Every remote aspect failed, each into its own slot
    assert_eq!(report.sentiment_score, None);
    assert_eq!(report.clarity_score, None);
    assert_eq!(report.technical_accuracy, None);
    assert_eq!(report.key_points, None);
    assert_eq!(report.improvement_areas, None);
    assert!(report.detailed_analysis.grammar.is_none());

    assert_eq!(
        report.errors.sentiment.as_deref(),
        Some("sentiment analysis failed")
    );
    assert_eq!(
        report.errors.clarity.as_deref(),
        Some("clarity analysis failed")
    );
    assert_eq!(
        report.errors.technical_accuracy.as_deref(),
        Some("technical accuracy analysis failed")
    );
    assert_eq!(
        report.errors.grammar.as_deref(),
        Some("grammar analysis failed")
    );
    assert_eq!(
        report.errors.key_points.as_deref(),
        Some("key point extraction failed")
    );
    assert_eq!(
        report.errors.improvement_areas.as_deref(),
        Some("improvement area extraction failed")
    );

    // Local analyzers are unaffected by the outage
    let complexity = &report.detailed_analysis.sentence_complexity;
    assert_eq!(complexity.complex_sentences + complexity.simple_sentences, 3);
    assert!(complexity.average_length > 0.0);

    // Vocabulary confidence comes from the local repetition score
    assert!(report.confidence_metrics.vocabulary.is_some());

    // The report echoes its inputs
    assert_eq!(report.transcription, request.transcription);
    assert_eq!(report.prompt, request.prompt);
}

#[tokio::test]
async fn test_empty_transcription_yields_empty_slots_not_errors() {
    let orchestrator = Orchestrator::new(unreachable_client());
    let request = AnalysisRequest {
        transcription: String::new(),
        audio: Vec::new(),
        prompt: "Any question".to_string(),
    };

    let report = orchestrator.analyze(&request).await;

    // Empty input short-circuits before any remote call, so nothing fails
    assert_eq!(report.errors.sentiment, None);
    assert_eq!(report.errors.clarity, None);
    assert_eq!(report.errors.grammar, None);
    assert_eq!(report.sentiment_score, None);
    assert_eq!(report.clarity_score, None);

    // Zero-sentence fallback for the complexity metrics
    let complexity = &report.detailed_analysis.sentence_complexity;
    assert_eq!(complexity.complex_sentences, 0);
    assert_eq!(complexity.simple_sentences, 0);
    assert_eq!(complexity.average_length, 0.0);
    assert_eq!(complexity.complexity_score, 0.5);
}
