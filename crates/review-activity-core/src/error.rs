//! Core error types for review-activity-core.
//!
//! Every stage of the fetch → aggregate → plot pipeline reports failures
//! through [`CoreError`]. All of them are terminal for a run.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for review-activity-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors talking to the review API
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Failed to encode the heat-map image
    #[error("Failed to render image: {0}")]
    Render(String),

    /// Failed to write the output image
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No token on the command line or in the environment
    #[error("no auth token given: pass --auth-token or set {env_var}")]
    MissingToken { env_var: &'static str },

    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while fetching completed reviews.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Token missing or rejected by the server
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Connection failure, timeout or broken transfer
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Any other non-success HTTP status
    #[error("Review API returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Response body was not the expected JSON shape
    #[error("Unexpected response from review API: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err)
    }
}

impl From<image::ImageError> for CoreError {
    fn from(err: image::ImageError) -> Self {
        CoreError::Render(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
