//! Page error types

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use rmexplorer_core::{CoreError, GENERIC_ERROR, render};

use crate::pages::shell;

/// Error rendered as a full HTML page
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCollection(kind) => Self {
                status: StatusCode::NOT_FOUND,
                message: format!("No {kind}s to pick from"),
            },
            CoreError::Client(err) => {
                tracing::warn!(%err, "upstream request failed");
                Self::bad_gateway(GENERIC_ERROR)
            }
            other => {
                tracing::error!(err = %other, "request failed");
                Self::internal(GENERIC_ERROR)
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        tracing::error!(%err, "template rendering failed");
        Self::internal(GENERIC_ERROR)
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid address: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = render::error(&self.message);
        let page = shell::render_page("Error | Rick and Morty Explorer", None, None, &body)
            .unwrap_or(body);
        (self.status, Html(page)).into_response()
    }
}
