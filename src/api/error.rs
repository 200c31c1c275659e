// src/api/error.rs
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure classes for backend calls. Every variant is recoverable: the UI
/// shows the message and returns the triggering control to a retryable state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout,
    /// broken transfer).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status. `message` carries the
    /// response body text when one could be read.
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// A 2xx response whose body does not match the expected shape.
    #[error("unexpected response from {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },

    /// A URL that could not be parsed or resolved against the server base.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The local file picked for upload could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
