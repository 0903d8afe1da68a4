//! Error types for the API client

use thiserror::Error;

/// Errors that can occur when talking to the Rick and Morty API
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// API returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server
        message: String,
    },

    /// Connection failed or was closed unexpectedly
    ///
    /// [`ReqwestTransport`](crate::ReqwestTransport) reports these as
    /// [`ClientError::Http`]; other [`Transport`](crate::Transport)
    /// implementations use this variant.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether the server answered with a non-success status
    ///
    /// Everything else is a transport or decoding failure.
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    /// Status code of an [`ClientError::Api`] error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 404,
            message: "Character not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (404): Character not found");
        assert!(err.is_status());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_network_error_is_not_status() {
        let err = ClientError::Network("connection reset".to_string());
        assert!(!err.is_status());
        assert_eq!(err.status(), None);
    }
}
