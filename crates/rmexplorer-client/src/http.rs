//! Typed HTTP client for the Rick and Morty API

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use reqwest::Client;
use rmexplorer_api::{CollectionPage, Entity, EntityKind};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};
use crate::transport::{ReqwestTransport, Transport};

/// Public API root used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

/// HTTP client for the collection and resource endpoints
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    ///
    /// # Example
    /// ```no_run
    /// use rmexplorer_client::HttpClient;
    ///
    /// let client = HttpClient::new("https://rickandmortyapi.com/api")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new()))
    }

    /// Create a new HTTP client with custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::with_client(client)))
    }

    /// Create a new HTTP client over any [`Transport`]
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_transport(
        base_url: impl AsRef<str>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // Url::join drops the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            transport,
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a collection endpoint, without query
    ///
    /// # Errors
    /// Returns an error if the joined URL is invalid.
    pub fn collection_url(&self, kind: EntityKind) -> Result<Url> {
        self.base_url.join(kind.api_path()).map_err(ClientError::Url)
    }

    /// URL of page `page` of a collection
    ///
    /// # Errors
    /// Returns an error if the joined URL is invalid.
    pub fn page_url(&self, kind: EntityKind, page: u32) -> Result<Url> {
        let mut url = self.collection_url(kind)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// URL of a name-filtered collection request
    ///
    /// # Errors
    /// Returns an error if the joined URL is invalid.
    pub fn search_url(&self, kind: EntityKind, name: &str) -> Result<Url> {
        let mut url = self.collection_url(kind)?;
        url.query_pairs_mut().append_pair("name", name);
        Ok(url)
    }

    /// URL of one or more resources by id (`/character/1,2,3`)
    ///
    /// # Errors
    /// Returns an error if the joined URL is invalid.
    pub fn resource_url(&self, kind: EntityKind, ids: &[u32]) -> Result<Url> {
        let joined = ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.base_url
            .join(&format!("{}/{joined}", kind.api_path()))
            .map_err(ClientError::Url)
    }

    /// Perform a GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let value = self.transport.get_json(url).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch the first page of a collection
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn collection<E: Entity>(&self) -> Result<CollectionPage<E>> {
        self.get(self.collection_url(E::KIND)?).await
    }

    /// Fetch page `page` of a collection
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    ///
    /// # Example
    /// ```no_run
    /// # use rmexplorer_client::HttpClient;
    /// # use rmexplorer_api::Character;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("https://rickandmortyapi.com/api")?;
    /// let page = client.page::<Character>(2).await?;
    /// println!("{} characters in total", page.info.count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn page<E: Entity>(&self, page: u32) -> Result<CollectionPage<E>> {
        self.get(self.page_url(E::KIND, page)?).await
    }

    /// Fetch the entities whose name contains `name`
    ///
    /// The API answers 404 when nothing matches.
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn search<E: Entity>(&self, name: &str) -> Result<CollectionPage<E>> {
        self.get(self.search_url(E::KIND, name)?).await
    }

    /// Fetch a single entity by id
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn entity<E: Entity>(&self, id: u32) -> Result<E> {
        self.get(self.resource_url(E::KIND, &[id])?).await
    }

    /// Fetch several entities with one comma-joined request
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn entities<E: Entity>(&self, ids: &[u32]) -> Result<Vec<E>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let value: Value = self.get(self.resource_url(E::KIND, ids)?).await?;
        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
            other => Err(ClientError::InvalidResponse(format!(
                "expected object or array, got {other}"
            ))),
        }
    }

    /// Fetch an absolute reference URL as returned inside entities
    ///
    /// # Errors
    /// Returns an error if the URL is invalid, the request fails, or the API
    /// returns an error.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get(Url::parse(url)?).await
    }

    /// Fetch every reference URL concurrently and join the results
    ///
    /// Results keep the order of `urls`. The first failure fails the whole
    /// call and the remaining requests are dropped.
    ///
    /// # Errors
    /// Returns the first error encountered among the requests.
    pub async fn fetch_all<T: DeserializeOwned>(&self, urls: &[String]) -> Result<Vec<T>> {
        debug!(count = urls.len(), "fetching related resources");
        try_join_all(urls.iter().map(|url| self.fetch(url))).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rmexplorer_api::{Character, Episode};
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct MockTransport {
        responses: HashMap<String, Value>,
        requests: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn with(mut self, url: &str, value: Value) -> Self {
            self.responses.insert(url.to_string(), value);
            self
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get_json(&self, url: Url) -> Result<Value> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| ClientError::Api {
                    status: 404,
                    message: "not found".to_string(),
                })
        }
    }

    fn episode_json(id: u32) -> Value {
        json!({
            "id": id,
            "name": format!("Episode {id}"),
            "air_date": "December 2, 2013",
            "episode": format!("S01E{id:02}"),
            "characters": []
        })
    }

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new("https://rickandmortyapi.com/api");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new("not a url");
        assert!(client.is_err());
    }

    #[test]
    fn test_url_building() {
        let client = HttpClient::new("https://rickandmortyapi.com/api").unwrap();
        assert_eq!(
            client.page_url(EntityKind::Character, 2).unwrap().as_str(),
            "https://rickandmortyapi.com/api/character?page=2"
        );
        assert_eq!(
            client
                .search_url(EntityKind::Episode, "pickle rick")
                .unwrap()
                .as_str(),
            "https://rickandmortyapi.com/api/episode?name=pickle+rick"
        );
        assert_eq!(
            client
                .resource_url(EntityKind::Location, &[1, 2, 3])
                .unwrap()
                .as_str(),
            "https://rickandmortyapi.com/api/location/1,2,3"
        );
    }

    #[tokio::test]
    async fn test_entities_accepts_single_object() {
        let transport = MockTransport::default()
            .with("http://api.test/episode/4", episode_json(4))
            .with(
                "http://api.test/episode/1,2",
                json!([episode_json(1), episode_json(2)]),
            );
        let client = HttpClient::with_transport("http://api.test", Arc::new(transport)).unwrap();

        let one = client.entities::<Episode>(&[4]).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].episode, "S01E04");

        let two = client.entities::<Episode>(&[1, 2]).await.unwrap();
        assert_eq!(two.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);

        assert!(client.entities::<Episode>(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_order() {
        let transport = Arc::new(
            MockTransport::default()
                .with("http://api.test/episode/2", episode_json(2))
                .with("http://api.test/episode/1", episode_json(1)),
        );
        let client = HttpClient::with_transport("http://api.test", transport.clone()).unwrap();

        let urls = vec![
            "http://api.test/episode/2".to_string(),
            "http://api.test/episode/1".to_string(),
        ];
        let episodes: Vec<Episode> = client.fetch_all(&urls).await.unwrap();

        assert_eq!(episodes.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(transport.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_fails_as_a_whole() {
        let transport = MockTransport::default().with("http://api.test/episode/1", episode_json(1));
        let client = HttpClient::with_transport("http://api.test", Arc::new(transport)).unwrap();

        let urls = vec![
            "http://api.test/episode/1".to_string(),
            "http://api.test/episode/99".to_string(),
        ];
        let result: Result<Vec<Episode>> = client.fetch_all(&urls).await;

        assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_search_not_found_is_status_error() {
        let client =
            HttpClient::with_transport("http://api.test", Arc::new(MockTransport::default()))
                .unwrap();

        let err = client.search::<Character>("zzz").await.unwrap_err();
        assert!(err.is_status());
    }
}
