//! Error types for pipeline operations

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline specific errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Filesystem error while reading or writing pipeline data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error raised by the market data client
    #[error("client error: {0}")]
    Client(#[from] finsight_client::ClientError),

    /// A vocabulary entry produced an invalid match pattern
    #[error("invalid vocabulary pattern for {name}: {source}")]
    Pattern {
        name: String,
        source: regex::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// No customer record exists for the given id
    #[error("unknown customer: {0}")]
    UnknownCustomer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::UnknownCustomer("c042".to_string());
        assert_eq!(err.to_string(), "unknown customer: c042");

        let err = PipelineError::Config("tick interval must be non-zero".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: tick interval must be non-zero"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PipelineError = io.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
