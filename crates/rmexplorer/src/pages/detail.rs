//! Detail pages

use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use rmexplorer_core::{DetailController, EntityView, RelatedView, ViewPhase};

use crate::pages::{AppError, request_url, shell};
use crate::state::AppState;

/// Detail page of one `E`, id taken from the query string
///
/// An unusable id answers 400 and a failed fetch 502; both still carry the
/// full page with the inline message.
pub async fn detail_page<E>(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, AppError>
where
    E: EntityView,
    E::Related: RelatedView,
{
    let requested = request_url(&state.public_url, &uri)?;
    let document = shell::detail_document::<E>(requested.clone());
    let controller = DetailController::<E>::new(state.client.clone(), document.clone());

    let outcome = controller.activate().await;

    let status = match (outcome.phase, outcome.id) {
        (ViewPhase::ErrorShown, None) => StatusCode::BAD_REQUEST,
        (ViewPhase::ErrorShown, Some(_)) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    let page = shell::render_detail::<E>(&document.lock(), &requested)?;
    Ok((status, Html(page)).into_response())
}
