//! Integration tests for voxmood-core

use pretty_assertions::assert_eq;
use rstest::rstest;
use voxmood_core::*;

fn event(start_ms: u64, text: &str, sentiment: Sentiment, confidence: f64) -> SentimentEvent {
    SentimentEvent {
        start_ms,
        text: text.to_string(),
        sentiment,
        confidence,
    }
}

/// One record per event, regardless of input length
#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
#[case(250)]
fn test_record_cardinality(#[case] n: usize) {
    let events: Vec<SentimentEvent> = (0..n)
        .map(|i| event(i as u64 * 1000, "word", Sentiment::Neutral, 0.5))
        .collect();

    assert_eq!(build_records(events).len(), n);
}

/// Records come out in the same order the events went in
#[test]
fn test_record_order_preserved() {
    let events = vec![
        event(9000, "third", Sentiment::Neutral, 0.6),
        event(1000, "first", Sentiment::Positive, 0.9),
        event(5000, "second", Sentiment::Negative, 0.7),
    ];

    let records = build_records(events);
    assert_eq!(records[0].text, "third");
    assert_eq!(records[1].text, "first");
    assert_eq!(records[2].text, "second");
}

/// Millisecond offsets convert to seconds
#[rstest]
#[case(4500, 4.5)]
#[case(0, 0.0)]
#[case(1000, 1.0)]
#[case(90_250, 90.25)]
fn test_time_conversion(#[case] start_ms: u64, #[case] expected_sec: f64) {
    let records = build_records(vec![event(start_ms, "x", Sentiment::Neutral, 0.5)]);
    assert_eq!(records[0].time_sec, expected_sec);
}

/// Confidence rounds to 2 decimal places, half away from zero
#[rstest]
#[case(0.8675, 0.87)]
#[case(0.91, 0.91)]
#[case(0.125, 0.13)]
#[case(1.0, 1.0)]
#[case(0.0, 0.0)]
fn test_confidence_rounding(#[case] confidence: f64, #[case] expected: f64) {
    let records = build_records(vec![event(0, "x", Sentiment::Neutral, confidence)]);
    assert_eq!(records[0].confidence, expected);
}

/// Empty input is a valid, empty result and not an error
#[test]
fn test_empty_input_is_empty_report() {
    let report = SentimentReport::from_records(build_records(Vec::new()));

    assert!(report.is_empty());
    assert_eq!(report.len(), 0);
    assert_eq!(report.frequency_counts().total(), 0);
}

/// Exported CSV parses back into the same records, in the same order
#[test]
fn test_csv_round_trip() {
    let records = build_records(vec![
        event(1000, "hello", Sentiment::Positive, 0.913),
        event(5000, "ugh, terrible", Sentiment::Negative, 0.77),
        event(9000, "it was \"fine\"", Sentiment::Neutral, 0.6),
    ]);
    let report = SentimentReport::from_records(records.clone());

    let parsed = records_from_csv(&report.to_csv()).unwrap();
    assert_eq!(parsed, records);
}

/// End-to-end shaping scenario from the three-event sample
#[test]
fn test_three_event_scenario() {
    let events = vec![
        event(1000, "hello", Sentiment::Positive, 0.91),
        event(5000, "ugh", Sentiment::Negative, 0.77),
        event(9000, "fine", Sentiment::Neutral, 0.60),
    ];

    let report = SentimentReport::from_records(build_records(events));

    assert_eq!(report.len(), 3);
    assert_eq!(report.records[0].time_sec, 1.0);
    assert_eq!(report.records[0].confidence, 0.91);
    assert_eq!(report.records[1].time_sec, 5.0);
    assert_eq!(report.records[1].confidence, 0.77);
    assert_eq!(report.records[2].time_sec, 9.0);
    assert_eq!(report.records[2].confidence, 0.6);

    let counts = report.frequency_counts();
    assert_eq!(counts.positive, 1);
    assert_eq!(counts.negative, 1);
    assert_eq!(counts.neutral, 1);
}

/// Wire payloads shape into events and then into records
#[test]
fn test_wire_payload_to_records() {
    let json = r#"{
        "id": "tr_789",
        "status": "completed",
        "audio_duration": 10.0,
        "sentiment_analysis_results": [
            {"text": "hello", "start": 1000, "end": 2000,
             "sentiment": "POSITIVE", "confidence": 0.91},
            {"text": "ugh", "start": 5000, "end": 6000,
             "sentiment": "NEGATIVE", "confidence": 0.77}
        ]
    }"#;

    let transcript: TranscriptResponse = serde_json::from_str(json).unwrap();
    assert_eq!(transcript.status, TranscriptStatus::Completed);

    let events = client::shape_events(transcript.sentiment_analysis_results.unwrap()).unwrap();
    let records = build_records(events);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text, "hello");
    assert_eq!(records[0].time_sec, 1.0);
    assert_eq!(records[1].sentiment, Sentiment::Negative);
}

/// A client without any API key source fails with a configuration error
#[test]
fn test_client_requires_api_key() {
    // Isolate every key source: no env fallback, and an empty home so the
    // XDG secrets lookup cannot find a developer's secrets file
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::env::remove_var(config::API_KEY_ENV);
    std::env::set_var("HOME", temp_dir.path());
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let result = TranscriptClient::new(AnalysisConfig::new());
    match result {
        Err(SentimentError::Configuration(message)) => {
            assert!(
                message.contains("No API key configured"),
                "Unexpected message: {}",
                message
            );
        }
        Err(e) => panic!("Expected Configuration error, got: {}", e),
        Ok(_) => panic!("Client construction should fail without an API key"),
    }
}

/// Transport-level failures surface as the Connection variant
#[tokio::test]
async fn test_transport_failure_maps_to_connection_error() {
    // Port 1 is never listening, so the connect fails immediately and no
    // request leaves the machine
    let config = AnalysisConfig::new()
        .with_api_key("test-key")
        .with_base_url("http://127.0.0.1:1");
    let client = TranscriptClient::new(config).unwrap();

    let err = client.fetch_transcript("tr_123").await.unwrap_err();
    match err {
        SentimentError::Connection(_) => {}
        e => panic!("Expected Connection error, got: {}", e),
    }
}

/// Report serialization keeps records and metadata intact
#[test]
fn test_report_serialization() {
    let report = SentimentReport {
        records: build_records(vec![event(1000, "hello", Sentiment::Positive, 0.91)]),
        transcript_id: Some("tr_1".to_string()),
        audio_duration: Some(3.0),
        processing_time: 1.5,
    };

    let json = serde_json::to_string(&report).unwrap();
    let deserialized: SentimentReport = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized.records, report.records);
    assert_eq!(deserialized.transcript_id, report.transcript_id);
    assert_eq!(deserialized.audio_duration, report.audio_duration);
    assert_eq!(deserialized.processing_time, report.processing_time);
}
