//! Client for the hosted transcription and sentiment analysis service

use crate::{
    config::AnalysisConfig,
    error::{Result, SentimentError},
    records::{build_records, Sentiment, SentimentEvent},
    report::SentimentReport,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Transcript job status as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

#[derive(Debug, Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
    sentiment_analysis: bool,
    speech_model: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

/// Transcript object returned by the service.
///
/// Every field the service may omit is optional; nothing is accessed
/// dynamically.
#[derive(Debug, Deserialize)]
pub struct TranscriptResponse {
    pub id: String,
    pub status: TranscriptStatus,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub audio_duration: Option<f64>,
    #[serde(default)]
    pub sentiment_analysis_results: Option<Vec<WireSentimentResult>>,
}

/// One sentiment judgment as it appears on the wire
#[derive(Debug, Deserialize)]
pub struct WireSentimentResult {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub end: Option<u64>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Client for submitting audio and retrieving sentiment results.
///
/// Holds its own HTTP client and the resolved API key; constructed
/// explicitly from an [`AnalysisConfig`], never from global state.
pub struct TranscriptClient {
    http: reqwest::Client,
    config: AnalysisConfig,
    api_key: String,
}

impl TranscriptClient {
    /// Create a new client with the given configuration
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let api_key = config.resolved_api_key()?;
        let http = reqwest::Client::new();

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Upload a local audio file, returning the URL the service assigned
    pub async fn upload_audio<P: AsRef<Path>>(&self, audio_path: P) -> Result<String> {
        let audio_path = audio_path.as_ref();
        let bytes = tokio::fs::read(audio_path).await?;

        debug!(
            "Uploading {} ({} bytes) to {}",
            audio_path.display(),
            bytes.len(),
            self.config.base_url
        );

        let response = self
            .http
            .post(format!("{}/upload", self.config.base_url))
            .header("authorization", &self.api_key)
            .body(bytes)
            .send()
            .await?;

        let upload: UploadResponse = decode_response(response).await?;
        Ok(upload.upload_url)
    }

    /// Submit a transcription job for audio at the given URL, returning the
    /// transcript id
    pub async fn submit(&self, audio_url: &str) -> Result<String> {
        let request = TranscriptRequest {
            audio_url,
            sentiment_analysis: self.config.sentiment_analysis,
            speech_model: self.config.speech_model.as_str(),
        };

        let response = self
            .http
            .post(format!("{}/transcript", self.config.base_url))
            .header("authorization", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let transcript: TranscriptResponse = decode_response(response).await?;
        debug!(
            "Submitted transcript {} (status: {:?})",
            transcript.id, transcript.status
        );
        Ok(transcript.id)
    }

    /// Fetch the current state of a transcript job
    pub async fn fetch_transcript(&self, transcript_id: &str) -> Result<TranscriptResponse> {
        let response = self
            .http
            .get(format!(
                "{}/transcript/{}",
                self.config.base_url, transcript_id
            ))
            .header("authorization", &self.api_key)
            .send()
            .await?;

        decode_response(response).await
    }

    /// Poll a transcript job until it completes or fails
    pub async fn wait_for_completion(&self, transcript_id: &str) -> Result<TranscriptResponse> {
        for attempt in 1..=self.config.max_poll_attempts {
            let transcript = self.fetch_transcript(transcript_id).await?;
            let status = transcript.status;

            match resolve_terminal(transcript) {
                Some(outcome) => return outcome,
                None => {
                    debug!(
                        "Transcript {} still {:?} (poll {}/{})",
                        transcript_id, status, attempt, self.config.max_poll_attempts
                    );
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }

        Err(SentimentError::Timeout(format!(
            "transcript {} not completed after {} polls",
            transcript_id, self.config.max_poll_attempts
        )))
    }

    /// Upload a local audio file and analyze it
    pub async fn analyze<P: AsRef<Path>>(&self, audio_path: P) -> Result<SentimentReport> {
        let upload_url = self.upload_audio(audio_path).await?;
        self.analyze_url(&upload_url).await
    }

    /// Analyze audio already reachable at a URL
    pub async fn analyze_url(&self, audio_url: &str) -> Result<SentimentReport> {
        let started = Instant::now();

        let transcript_id = self.submit(audio_url).await?;
        info!("Waiting for transcript {}...", transcript_id);
        let transcript = self.wait_for_completion(&transcript_id).await?;

        let results = transcript.sentiment_analysis_results.unwrap_or_default();
        if results.is_empty() {
            warn!("Transcript {} has no sentiment markers", transcript_id);
        }

        let mut events = shape_events(results)?;
        // Chronological order is assumed but not contractual, so sort here
        // rather than trusting the service. The sort is stable.
        events.sort_by_key(|event| event.start_ms);

        Ok(SentimentReport {
            records: build_records(events),
            transcript_id: Some(transcript_id),
            audio_duration: transcript.audio_duration,
            processing_time: started.elapsed().as_secs_f64(),
        })
    }
}

/// Map a terminal transcript status to its outcome.
///
/// A completed transcript is the result; an error status becomes a
/// Service error carrying the service's own message. `None` means the
/// job is still in flight and polling should continue.
fn resolve_terminal(transcript: TranscriptResponse) -> Option<Result<TranscriptResponse>> {
    match transcript.status {
        TranscriptStatus::Completed => Some(Ok(transcript)),
        TranscriptStatus::Error => {
            let message = transcript
                .error
                .unwrap_or_else(|| "service reported an unspecified error".to_string());
            Some(Err(SentimentError::Service(message)))
        }
        TranscriptStatus::Queued | TranscriptStatus::Processing => None,
    }
}

/// Validate wire sentiment results into [`SentimentEvent`]s.
///
/// Every field a record needs is required; a missing or malformed field
/// fails the whole response rather than silently dropping the event.
pub fn shape_events(results: Vec<WireSentimentResult>) -> Result<Vec<SentimentEvent>> {
    results
        .into_iter()
        .enumerate()
        .map(|(i, result)| {
            let start_ms = result.start.ok_or_else(|| {
                SentimentError::Response(format!("sentiment result {} is missing start", i))
            })?;

            let text = result.text.ok_or_else(|| {
                SentimentError::Response(format!("sentiment result {} is missing text", i))
            })?;

            let label = result.sentiment.ok_or_else(|| {
                SentimentError::Response(format!("sentiment result {} is missing sentiment", i))
            })?;
            let sentiment = Sentiment::from_str(&label).map_err(|_| {
                SentimentError::Response(format!(
                    "sentiment result {} has unknown label: {}",
                    i, label
                ))
            })?;

            let confidence = result.confidence.ok_or_else(|| {
                SentimentError::Response(format!("sentiment result {} is missing confidence", i))
            })?;
            if !(0.0..=1.0).contains(&confidence) {
                return Err(SentimentError::Response(format!(
                    "sentiment result {} has confidence outside [0, 1]: {}",
                    i, confidence
                )));
            }

            Ok(SentimentEvent {
                start_ms,
                text,
                sentiment,
                confidence,
            })
        })
        .collect()
}

/// Decode a service response, distinguishing service-reported errors from
/// malformed payloads
async fn decode_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SentimentError::Service(service_error_message(
            status, &body,
        )));
    }

    serde_json::from_str(&body)
        .map_err(|e| SentimentError::Response(format!("invalid service payload: {}", e)))
}

/// Extract the service's own error message when it sends one, otherwise
/// fall back to the HTTP status
fn service_error_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => format!("HTTP {}", status),
    }
}
