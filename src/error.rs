use thiserror::Error;

/// Failures the retrieval pipeline knows how to recover from.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Network, timeout, HTTP status or unreadable response body
    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload did not have the expected shape
    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    /// Local database could not be read or written
    #[error("Store error: {0}")]
    Store(String),

    /// Symbol is not part of the current listing snapshot
    #[error("Symbol not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for TrackingError {
    fn from(err: reqwest::Error) -> Self {
        TrackingError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for TrackingError {
    fn from(err: serde_json::Error) -> Self {
        TrackingError::Transport(format!("Malformed response body: {}", err))
    }
}

impl From<csv::Error> for TrackingError {
    fn from(err: csv::Error) -> Self {
        TrackingError::SchemaValidation(err.to_string())
    }
}

impl From<sqlx::Error> for TrackingError {
    fn from(err: sqlx::Error) -> Self {
        TrackingError::Store(err.to_string())
    }
}
