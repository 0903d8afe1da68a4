//! Page handlers
//!
//! Every page request builds a fresh document at the requested address,
//! drives it with the matching controller and renders it into the shell.

pub mod detail;
pub mod error;
pub mod list;
pub mod shell;
pub mod system;

pub use error::AppError;

use axum::http::Uri;
use url::Url;

/// Absolute address of the request, resolved against the public origin
pub(crate) fn request_url(public_url: &Url, uri: &Uri) -> Result<Url, AppError> {
    let path = uri.path_and_query().map_or("/", |pq| pq.as_str());
    Ok(public_url.join(path)?)
}
