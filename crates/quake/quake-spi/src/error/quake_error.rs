//! Seismic data error types.

use thiserror::Error;

/// Errors raised while fetching, aggregating or scoring events.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuakeError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Upstream service answered with a non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Failed to parse a response or artifact
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Too few events in the window to compute features
    #[error("Insufficient data: need at least {required} events, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model artifact could not be loaded
    #[error("Failed to load model from {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    /// Model could not score a feature vector
    #[error("Model error: {0}")]
    Model(String),
}

/// Result type for seismic data operations.
pub type Result<T> = std::result::Result<T, QuakeError>;
