//! Core error types for rmexplorer-core

use rmexplorer_api::EntityKind;
use rmexplorer_client::ClientError;
use thiserror::Error;

/// Errors that can occur while driving a page
#[derive(Error, Debug)]
pub enum CoreError {
    /// Required query parameter is absent from the address
    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    /// Query parameter is present but unusable
    #[error("invalid value for query parameter {name}: {value:?}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Raw value found in the address
        value: String,
    },

    /// Request to the API failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// HTML template failed to render
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    /// Address could not be built
    #[error("invalid address: {0}")]
    Address(#[from] url::ParseError),

    /// Collection reported zero entities
    #[error("{0} collection is empty")]
    EmptyCollection(EntityKind),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
