//! rmexplorer-client: HTTP client for the Rick and Morty API
//!
//! Wraps the collection and resource endpoints in typed requests and
//! provides the concurrent fan-out used by the detail pages.
//!
//! # Examples
//!
//! ```no_run
//! use rmexplorer_api::{Character, Episode, Entity};
//! use rmexplorer_client::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("https://rickandmortyapi.com/api")?;
//!
//! // One page of a collection
//! let page = client.page::<Character>(1).await?;
//! println!("{} pages", page.info.pages);
//!
//! // A single character and every episode it appears in
//! let rick = client.entity::<Character>(1).await?;
//! let episodes: Vec<Episode> = client.fetch_all(rick.related_urls()).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod transport;

pub use error::{ClientError, Result};
pub use http::{DEFAULT_BASE_URL, HttpClient};
pub use transport::{ReqwestTransport, Transport};
