//! Transit error types

use thiserror::Error;

/// Errors that can occur during transit API operations
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the transit service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the transit service returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a response from the transit service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid query provided (e.g. empty search text)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
    /// Returns true for transient failures worth one more attempt
    ///
    /// Timeouts and connection failures are transient. A non-2xx status or
    /// an unparseable body is a hard protocol error and is never retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout { .. })
    }
}
