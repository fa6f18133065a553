//! Client error types

use http::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success response from the Admin API (raw body preserved)
    #[error("Shopify API error ({status})")]
    Api { status: StatusCode, body: String },

    /// Upstream call exceeded the configured bound
    #[error("upstream request timed out")]
    Timeout,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Response body did not decode as expected
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Access token is not a valid header value
    #[error("access token is not a valid header value")]
    InvalidToken,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(e)
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
