//! Speech model selection for the hosted transcription service

use crate::error::{Result, SentimentError};
use std::str::FromStr;

/// Named speech models accepted by the transcription service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SpeechModel {
    /// Universal 3 Pro model (highest accuracy, required for sentiment analysis)
    Universal3Pro,
    /// Universal model (good general-purpose accuracy)
    Universal,
    /// Best model (provider picks the strongest available model)
    Best,
    /// Nano model (fastest, lowest cost)
    Nano,
    /// Slam 1 model (prompt-tunable English model)
    Slam1,
}

impl SpeechModel {
    /// Get the model identifier string used on the wire
    pub const fn as_str(&self) -> &'static str {
        match self {
            SpeechModel::Universal3Pro => "universal-3-pro",
            SpeechModel::Universal => "universal",
            SpeechModel::Best => "best",
            SpeechModel::Nano => "nano",
            SpeechModel::Slam1 => "slam-1",
        }
    }

    /// Get the model description
    pub const fn description(&self) -> &'static str {
        match self {
            SpeechModel::Universal3Pro => {
                "Universal 3 Pro model (highest accuracy, supports sentiment analysis)"
            }
            SpeechModel::Universal => "Universal model (good general-purpose accuracy)",
            SpeechModel::Best => "Best model (provider selects the strongest model)",
            SpeechModel::Nano => "Nano model (fastest, lowest cost)",
            SpeechModel::Slam1 => "Slam 1 model (prompt-tunable, English only)",
        }
    }

    /// Get all available models
    pub const fn all_models() -> &'static [SpeechModel] {
        &[
            SpeechModel::Universal3Pro,
            SpeechModel::Universal,
            SpeechModel::Best,
            SpeechModel::Nano,
            SpeechModel::Slam1,
        ]
    }
}

impl Default for SpeechModel {
    fn default() -> Self {
        SpeechModel::Universal3Pro
    }
}

impl FromStr for SpeechModel {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "universal-3-pro" => Ok(SpeechModel::Universal3Pro),
            "universal" => Ok(SpeechModel::Universal),
            "best" => Ok(SpeechModel::Best),
            "nano" => Ok(SpeechModel::Nano),
            "slam-1" => Ok(SpeechModel::Slam1),
            _ => Err(SentimentError::Configuration(format!(
                "Unknown speech model: {}",
                s
            ))),
        }
    }
}
