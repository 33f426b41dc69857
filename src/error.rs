//! Error types for the FinerWorks client.
//!
//! The API distinguishes a request the server rejected with an explanation
//! (HTTP 400, structured JSON detail) from a transport or auth failure. The
//! former is returned to the caller as a normal value; only the latter shows
//! up here.

use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or empty credential, or an unusable base URL.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API answered with a status other than 200 or 400.
    #[error("Could not connect. Status code: {status}")]
    Transport { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;
