//! Voxmood Core Library
//!
//! This library turns speech audio into per-segment sentiment data using a
//! hosted transcription service, and shapes the results for display and
//! CSV export.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod records;
pub mod report;

pub use client::{TranscriptClient, TranscriptResponse, TranscriptStatus};
pub use config::AnalysisConfig;
pub use error::{Result, SentimentError};
pub use model::SpeechModel;
pub use records::{build_records, Sentiment, SentimentEvent, SentimentRecord};
pub use report::{records_from_csv, SentimentCounts, SentimentReport, CSV_HEADER};
use tracing::info;

/// High-level analysis function for a local audio file
pub async fn analyze_audio_file<P: AsRef<std::path::Path>>(
    audio_path: P,
    config: Option<AnalysisConfig>,
) -> Result<SentimentReport> {
    let config = config.unwrap_or_default();

    let client = TranscriptClient::new(config)?;

    info!("Analyzing audio file: {:?}", audio_path.as_ref());
    client.analyze(audio_path).await
}

/// High-level analysis function for audio already reachable at a URL
pub async fn analyze_audio_url(
    audio_url: &str,
    config: Option<AnalysisConfig>,
) -> Result<SentimentReport> {
    let config = config.unwrap_or_default();

    let client = TranscriptClient::new(config)?;

    info!("Analyzing remote audio: {}", audio_url);
    client.analyze_url(audio_url).await
}
