//! Error types for dcbox-upload-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dcbox-upload-core
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dcbox-upload-core
#[derive(Error, Debug)]
pub enum Error {
    /// Required settings are absent or empty
    #[error("Required environment variables are not set: {}", .missing.join(", "))]
    Config { missing: Vec<String> },

    /// Token exchange failed; nothing can run without a session
    #[error("{0}")]
    Authentication(String),

    /// A remote folder could not be created
    #[error("Failed to create a new node \"{name}\": {reason}")]
    FolderCreation { name: String, reason: String },

    /// A file was rejected by the remote or could not be sent
    #[error("Failed to upload: {}{}", .path.display(), reason_suffix(.reason))]
    Upload { path: PathBuf, reason: Option<String> },

    /// A local directory could not be enumerated
    #[error("{} could not be uploaded: {source}", .path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote API answered `success: false` without further detail
    #[error("request was rejected: {0}")]
    Rejected(String),

    /// Remote API answered with an unexpected status or payload
    #[error("DirectCloud API error: {0}")]
    Api(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Timeout
    #[error("Operation timed out")]
    Timeout,
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map(|r| format!(" ({})", r))
        .unwrap_or_default()
}

impl Error {
    /// Whether the traversal absorbs this error and prunes the branch instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::FolderCreation { .. } | Error::Listing { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() {
            Error::Network(err.to_string())
        } else if err.is_request() || err.is_builder() {
            Error::HttpClient(err.to_string())
        } else if err.is_decode() {
            Error::Api(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}
