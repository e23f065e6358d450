//! Sentiment events and their presentation-ready record form

use serde::{Deserialize, Serialize};

/// Sentiment label assigned by the transcription service
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All labels, in display order
    pub const fn all() -> &'static [Sentiment] {
        &[Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative]
    }
}

/// A single timestamped sentiment judgment as delivered by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentEvent {
    /// Offset from the start of the audio, in milliseconds
    pub start_ms: u64,

    /// Transcribed text span this judgment applies to
    pub text: String,

    /// Sentiment label
    pub sentiment: Sentiment,

    /// Service-reported confidence in [0, 1]
    pub confidence: f64,
}

/// A normalized record ready for display and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Offset from the start of the audio, in seconds (2 decimal places)
    pub time_sec: f64,

    /// Transcribed text span
    pub text: String,

    /// Sentiment label
    pub sentiment: Sentiment,

    /// Confidence rounded to 2 decimal places
    pub confidence: f64,
}

/// Build presentation records from raw sentiment events.
///
/// One record per event, in input order. Start offsets are converted to
/// seconds and confidence values are rounded to 2 decimal places using
/// round-half-away-from-zero.
pub fn build_records(events: Vec<SentimentEvent>) -> Vec<SentimentRecord> {
    events
        .into_iter()
        .map(|event| SentimentRecord {
            time_sec: round2(event.start_ms as f64 / 1000.0),
            text: event.text,
            sentiment: event.sentiment,
            confidence: round2(event.confidence),
        })
        .collect()
}

/// Round to 2 decimal places, half away from zero
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
