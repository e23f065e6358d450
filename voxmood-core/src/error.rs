//! Error types for the voxmood-core library

use thiserror::Error;

/// Main error type for voxmood operations
#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Service error: {0}")]
    Service(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Response error: {0}")]
    Response(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Timed out waiting for transcript: {0}")]
    Timeout(String),
}

/// Result type alias for voxmood operations
pub type Result<T> = std::result::Result<T, SentimentError>;

impl From<reqwest::Error> for SentimentError {
    fn from(err: reqwest::Error) -> Self {
        SentimentError::Connection(err.to_string())
    }
}

impl PartialEq for SentimentError {
    fn eq(&self, other: &Self) -> bool {
        match self {
            SentimentError::Service(msg) => {
                matches!(other, SentimentError::Service(o) if msg == o)
            }
            SentimentError::Connection(msg) => {
                matches!(other, SentimentError::Connection(o) if msg == o)
            }
            SentimentError::Response(msg) => {
                matches!(other, SentimentError::Response(o) if msg == o)
            }
            SentimentError::Io(err) => {
                matches!(other, SentimentError::Io(e) if err.to_string() == e.to_string())
            }
            SentimentError::Configuration(msg) => {
                matches!(other, SentimentError::Configuration(o) if msg == o)
            }
            SentimentError::Timeout(msg) => {
                matches!(other, SentimentError::Timeout(o) if msg == o)
            }
        }
    }
}
