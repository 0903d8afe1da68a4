//! Name search over a collection

use rmexplorer_api::{CollectionPage, Entity};
use rmexplorer_client::HttpClient;
use tracing::{debug, instrument, warn};

/// Message shown for any failure that has no more specific text
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Result of one search call
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<E> {
    /// The query was blank; show the default listing
    Cleared,
    /// Entities whose name matches the query
    Found(CollectionPage<E>),
    /// Message to show instead of results
    Failed(String),
}

/// Search the collection of `E` by name
///
/// `on_loading(true)` fires before any network activity and
/// `on_loading(false)` after completion, exactly once each. A blank query
/// skips the request. A non-success status yields `not_found`; transport
/// failures yield [`GENERIC_ERROR`].
#[instrument(skip(client, not_found, on_loading), fields(kind = %E::KIND))]
pub async fn search_entities<E, F>(
    client: &HttpClient,
    query: &str,
    not_found: &str,
    mut on_loading: F,
) -> SearchOutcome<E>
where
    E: Entity,
    F: FnMut(bool) + Send,
{
    on_loading(true);

    let query = query.trim();
    let outcome = if query.is_empty() {
        debug!("blank query, restoring default listing");
        SearchOutcome::Cleared
    } else {
        match client.search::<E>(query).await {
            Ok(page) => SearchOutcome::Found(page),
            Err(err) if err.is_status() => {
                debug!(%err, "no matches");
                SearchOutcome::Failed(not_found.to_string())
            }
            Err(err) => {
                warn!(%err, "search request failed");
                SearchOutcome::Failed(GENERIC_ERROR.to_string())
            }
        }
    };

    on_loading(false);
    outcome
}
