//! Error types for the feed client

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when fetching a community listing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The listing endpoint answered with a non-success status
    #[error("Feed returned error status {status} for {url}")]
    Status { status: u16, url: String },

    /// Unknown time window name
    #[error("Invalid time window: {0} (expected hour, day, week, month, year or all)")]
    InvalidTimeWindow(String),
}
