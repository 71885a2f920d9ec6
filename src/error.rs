//! Error handling for apiprobe

use thiserror::Error;

/// Main error type for apiprobe operations
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Transport error while communicating with endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Too many redirects (limit {limit}) at {url}")]
    TooManyRedirects { limit: u32, url: String },

    #[error("Expected status code {expected} but was {actual}\n{response}")]
    StatusMismatch {
        expected: u16,
        actual: u16,
        response: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for apiprobe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
