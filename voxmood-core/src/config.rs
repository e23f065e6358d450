//! Configuration options for sentiment analysis requests

use crate::error::{Result, SentimentError};
use crate::model::SpeechModel;
use directories::ProjectDirs;
use serde::Deserialize;
use std::time::Duration;

/// Default endpoint of the hosted transcription service
pub const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com/v2";

/// Environment variable consulted when no API key is set explicitly
pub const API_KEY_ENV: &str = "ASSEMBLYAI_API_KEY";

/// Configuration for a sentiment analysis run.
///
/// The API key lives here, on an explicitly constructed value passed to the
/// client, never on process-wide shared state.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// API key for the transcription service
    pub api_key: Option<String>,

    /// Named speech model to transcribe with
    pub speech_model: SpeechModel,

    /// Service endpoint (overridable for testing)
    pub base_url: String,

    /// Request per-segment sentiment analysis
    pub sentiment_analysis: bool,

    /// Delay between transcript status polls
    pub poll_interval: Duration,

    /// Give up after this many status polls
    pub max_poll_attempts: usize,

    /// Enable verbose debug output
    pub verbose: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None, // Resolved from env or the secrets file
            speech_model: SpeechModel::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            sentiment_analysis: true,
            poll_interval: Duration::from_secs(3),
            max_poll_attempts: 100,
            verbose: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the speech model
    pub fn with_speech_model(mut self, model: SpeechModel) -> Self {
        self.speech_model = model;
        self
    }

    /// Set the service endpoint
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the delay between transcript status polls
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Enable or disable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve the effective API key: explicit value, then the
    /// environment, then the XDG secrets file.
    pub fn resolved_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        if let Some(key) = stored_api_key() {
            return Ok(key);
        }

        Err(SentimentError::Configuration(format!(
            "No API key configured. Pass one explicitly or set {}",
            API_KEY_ENV
        )))
    }
}

#[derive(Debug, Deserialize)]
struct StoredSecrets {
    api_key: String,
}

/// Read the API key from the XDG config directory, if present
pub fn stored_api_key() -> Option<String> {
    let project_dirs = ProjectDirs::from("dev.voxmood", "", "voxmood")?;
    let secrets_path = project_dirs.config_dir().join("secrets.json");
    let contents = std::fs::read_to_string(secrets_path).ok()?;
    let secrets: StoredSecrets = serde_json::from_str(&contents).ok()?;

    if secrets.api_key.is_empty() {
        None
    } else {
        Some(secrets.api_key)
    }
}
