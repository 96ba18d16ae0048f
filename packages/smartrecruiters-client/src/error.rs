//! Error types for the SmartRecruiters client.

use thiserror::Error;

/// Result type for SmartRecruiters client operations.
pub type Result<T> = std::result::Result<T, SmartRecruitersError>;

/// SmartRecruiters client errors.
#[derive(Debug, Error)]
pub enum SmartRecruitersError {
    /// Network error (connection failed, invalid request URL)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body could not be decoded into the expected shape
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Base URL could not be parsed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Base URL cannot take path segments (e.g. `mailto:`)
    #[error("base URL cannot carry path segments: {0}")]
    InvalidBaseUrl(String),

    /// Detail enrichment needs the `ref` link of every summary posting
    #[error("job post {id} has no detail reference")]
    MissingReference { id: String },
}

/// Failure to turn a raw `id` value into its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier must be an integer or a string, got {kind}")]
    Unsupported { kind: &'static str },
}
