//! System endpoints

use axum::{Json, response::IntoResponse, response::Redirect};
use rmexplorer_api::EntityKind;
use serde_json::json;

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// The character list is the landing page
pub async fn index() -> Redirect {
    Redirect::to(EntityKind::Character.list_path())
}
