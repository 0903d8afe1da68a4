//! Application state shared across HTTP handlers

use rmexplorer_client::HttpClient;
use url::Url;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client for the upstream API
    pub client: HttpClient,
    /// Origin that page addresses are resolved against
    pub public_url: Url,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    /// Returns error if the configured public URL is invalid
    pub fn new(client: HttpClient, config: &Config) -> eyre::Result<Self> {
        Ok(Self {
            client,
            public_url: config.public_url()?,
        })
    }
}
