//! Error types for the data source.

use thiserror::Error;

/// Errors that can occur while querying the monitoring server.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse a response body or query descriptor.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// A server date string (or timestamp) could not be converted.
    #[error("Failed to parse date: {0}")]
    DateParse(String),
}

impl From<reqwest::Error> for DataSourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataSourceError::Timeout
        } else if err.is_connect() {
            DataSourceError::Connection(err.to_string())
        } else {
            DataSourceError::Http(err.to_string())
        }
    }
}
