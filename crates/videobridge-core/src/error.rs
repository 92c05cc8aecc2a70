//! Application-wide error types
//!
//! This module defines a centralized error type using `thiserror`. The
//! relay's own handling path never surfaces these; they cover harness
//! setup, message I/O, and port implementations.

use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The page address could not be parsed
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error while reading the message stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to post a message to the parent context
    #[error("failed to post message: {0}")]
    PostFailed(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BridgeError>;
