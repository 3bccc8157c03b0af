//! HTTP transport abstraction.
//!
//! The engine only ever issues `GET` requests and consumes parsed JSON
//! bodies; everything else about the network (timeouts, retries, TLS) lives
//! behind this trait. Tests substitute an in-memory implementation.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::DataSourceError;

/// Trait for issuing API requests and returning parsed JSON bodies.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Issue a `GET` request and parse the response body as JSON.
    async fn get(&self, url: &str) -> Result<Value, DataSourceError>;
}

/// Default transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Value, DataSourceError> {
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DataSourceError::Auth("Invalid credentials".to_string()));
        }

        if !response.status().is_success() {
            return Err(DataSourceError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DataSourceError::Parse(e.to_string()))
    }
}
