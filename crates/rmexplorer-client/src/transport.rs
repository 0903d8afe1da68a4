//! Transport seam between the typed client and the network

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, Result};

/// Performs a single GET and decodes the body as JSON
///
/// Implementations must map a non-success status to [`ClientError::Api`].
/// Connection failures map to [`ClientError::Network`] unless the backend
/// has its own error variant.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: Url) -> Result<Value>;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest::Client`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Create a transport whose requests give up after `timeout`
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip_all, fields(url = %url), level = "debug")]
    async fn get_json(&self, url: Url) -> Result<Value> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            debug!(status, "request rejected");
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}
