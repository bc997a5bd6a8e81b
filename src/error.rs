//! Error types for the GitHub tool.

use thiserror::Error;

/// The main error type for GitHub operations.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Error creating repository {name}: {source}")]
    CreationFailed {
        name: String,
        #[source]
        source: Box<ToolError>,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl ToolError {
    /// The HTTP status of a failed API call, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ToolError::Api { status, .. } => Some(*status),
            ToolError::Http(e) => e.status().map(|s| s.as_u16()),
            ToolError::CreationFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the call never produced a response (connection, DNS, timeout).
    ///
    /// A response whose body fails to decode is not a network failure.
    pub fn is_network(&self) -> bool {
        match self {
            ToolError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            ToolError::CreationFailed { source, .. } => source.is_network(),
            _ => false,
        }
    }
}

/// A specialized Result type for GitHub tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
