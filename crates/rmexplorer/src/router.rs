//! HTTP router configuration

use std::sync::Arc;

use axum::{Router, routing::get};
use rmexplorer_api::{Character, Episode, Location};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::pages::{detail, list, system};
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // System endpoints
        .route("/", get(system::index))
        .route("/health", get(system::health))
        // List pages
        .route("/characters", get(list::list_page::<Character>))
        .route("/episodes", get(list::list_page::<Episode>))
        .route("/locations", get(list::list_page::<Location>))
        // Random jumps
        .route("/characters/random", get(list::random_page::<Character>))
        .route("/episodes/random", get(list::random_page::<Episode>))
        .route("/locations/random", get(list::random_page::<Location>))
        // Detail pages
        .route("/character-detail", get(detail::detail_page::<Character>))
        .route("/episode-detail", get(detail::detail_page::<Episode>))
        .route("/location-detail", get(detail::detail_page::<Location>))
        // State
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use rmexplorer_client::{ClientError, HttpClient, Transport};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::config::Config;

    const API: &str = "https://rickandmortyapi.com/api/";

    #[derive(Default)]
    struct MockApi {
        responses: HashMap<String, Value>,
    }

    impl MockApi {
        fn with(mut self, path: &str, value: Value) -> Self {
            self.responses.insert(format!("{API}{path}"), value);
            self
        }
    }

    #[async_trait]
    impl Transport for MockApi {
        async fn get_json(&self, url: Url) -> Result<Value, ClientError> {
            self.responses
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| ClientError::Api {
                    status: 404,
                    message: "There is nothing here".to_string(),
                })
        }
    }

    fn location_json(id: u32) -> Value {
        json!({
            "id": id,
            "name": format!("Location {id}"),
            "type": "Planet",
            "dimension": "Dimension C-137",
            "residents": [],
            "url": format!("{API}location/{id}")
        })
    }

    fn location_page(page: u32, pages: u32) -> Value {
        let link = |n: u32| Value::String(format!("{API}location?page={n}"));
        json!({
            "info": {
                "count": pages,
                "pages": pages,
                "next": if page < pages { link(page + 1) } else { Value::Null },
                "prev": if page > 1 { link(page - 1) } else { Value::Null },
            },
            "results": [location_json(page)]
        })
    }

    fn app(api: MockApi) -> Router {
        let client = HttpClient::with_transport(API, Arc::new(api)).unwrap();
        let state = AppState::new(client, &Config::default()).unwrap();
        create_router(Arc::new(state))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String, Option<String>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap(), location)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body, _) = get(app(MockApi::default()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_index_redirects_to_characters() {
        let (status, _, location) = get(app(MockApi::default()), "/").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/characters"));
    }

    #[tokio::test]
    async fn test_list_page_renders_grid() {
        let api = MockApi::default().with("location?page=1", location_page(1, 2));
        let (status, body, _) = get(app(api), "/locations").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Location 1"));
        assert!(body.contains(r#"href="/location-detail?locationId=1""#));
        assert!(body.contains(r#"value="prev" disabled>"#));
        assert!(body.contains(r#"value="next">"#));
        assert!(!body.contains("replaceState"));
    }

    #[tokio::test]
    async fn test_next_action_moves_address() {
        let api = MockApi::default()
            .with("location?page=1", location_page(1, 2))
            .with("location?page=2", location_page(2, 2));
        let (status, body, _) = get(app(api), "/locations?page=1&action=next").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Location 2"));
        assert!(body.contains(r#"history.replaceState(null, "", "/locations?page=2");"#));
        assert!(body.contains(r#"value="next" disabled>"#));
    }

    #[tokio::test]
    async fn test_unknown_action_renders_requested_page() {
        let api = MockApi::default().with("location?page=1", location_page(1, 2));
        let (status, body, _) = get(app(api), "/locations?action=sideways").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Location 1"));
        assert!(body.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_detail_page_sets_title() {
        let api = MockApi::default().with("location/4", location_json(4));
        let (status, body, _) = get(app(api), "/location-detail?locationId=4").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Location 4 | Rick and Morty Explorer</title>"));
        assert!(body.contains("No known residents."));
    }

    #[tokio::test]
    async fn test_detail_page_invalid_id() {
        let (status, body, _) =
            get(app(MockApi::default()), "/episode-detail?episodeId=nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid episode ID"));
    }

    #[tokio::test]
    async fn test_detail_page_upstream_failure() {
        let (status, body, _) =
            get(app(MockApi::default()), "/character-detail?characterId=9999").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("Something went wrong"));
    }

    #[tokio::test]
    async fn test_random_redirects_to_detail() {
        let api = MockApi::default().with("location", location_page(1, 1));
        let (status, _, location) = get(app(api), "/locations/random").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/location-detail?locationId=1"));
    }
}
