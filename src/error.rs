use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RendezError {
    #[error(
        "no response matching \"{matcher}\" within {timeout:?} ({responses_seen} non-matching responses observed)"
    )]
    Timeout {
        matcher: String,
        timeout: Duration,
        responses_seen: usize,
    },

    #[error("invalid matcher: {0}")]
    InvalidMatcher(String),

    #[error("response stream closed before a matching response arrived")]
    StreamClosed,

    #[error("trigger action failed: {0}")]
    TriggerFailed(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for RendezError {
    fn from(err: anyhow::Error) -> Self {
        RendezError::Other(err.to_string())
    }
}

impl From<regex::Error> for RendezError {
    fn from(err: regex::Error) -> Self {
        RendezError::InvalidMatcher(err.to_string())
    }
}

/// Result type for rendez crate
pub type Result<T> = std::result::Result<T, RendezError>;
