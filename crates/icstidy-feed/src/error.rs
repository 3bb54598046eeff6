//! Error types for feed operations.

use thiserror::Error;

/// An error that occurred while fetching the feed or sending a
/// notification.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network error: connection failed, timeout, DNS resolution, or a
    /// response body that could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The feed URL does not exist (404).
    #[error("feed not found: {0}")]
    NotFound(String),

    /// The remote server returned a 5xx status.
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Any other unexpected HTTP status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The notification endpoint rejected the message.
    #[error("notification failed: {0}")]
    Notification(String),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FeedError {
    /// Returns true if this error is transient and the operation may be
    /// retried on a later run.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}

/// A specialized Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
