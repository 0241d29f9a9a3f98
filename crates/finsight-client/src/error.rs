//! Error types for market data client operations

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the financial-data chat API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network, timeout, or body-decode error from the HTTP layer
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status code
    #[error("unexpected status {status} from {endpoint}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// JSON serialization or parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be parsed or joined
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}
