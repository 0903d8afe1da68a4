//! List pages and the random-entity jump

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::Uri,
    response::{Html, Redirect},
};
use rmexplorer_core::{EntityView, ListController, address};
use serde::Deserialize;
use tracing::debug;

use crate::pages::{AppError, request_url, shell};
use crate::state::AppState;

/// Query parameter carrying a pagination button press
const ACTION_PARAM: &str = "action";

/// Pagination button submitted with the list form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Next,
    Prev,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub action: Option<String>,
}

impl ListParams {
    /// Pagination step requested, if any; unknown values are ignored
    fn page_action(&self) -> Option<PageAction> {
        match self.action.as_deref()? {
            "next" => Some(PageAction::Next),
            "prev" => Some(PageAction::Prev),
            other => {
                debug!(action = other, "ignoring unknown pagination action");
                None
            }
        }
    }
}

/// List page of `E`
///
/// `page` and `name` come from the address. An `action` parameter runs the
/// matching pagination step first; the resulting address is handed back to
/// the browser through the page shell.
pub async fn list_page<E: EntityView>(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
    uri: Uri,
) -> Result<Html<String>, AppError> {
    let requested = request_url(&state.public_url, &uri)?;
    let location = address::with_param(&requested, ACTION_PARAM, None);
    let document = shell::list_document::<E>(location);
    let controller = ListController::<E>::new(state.client.clone(), document.clone());

    let outcome = match params.page_action() {
        Some(action) => {
            debug!(kind = %E::KIND, ?action, "pagination action");
            let current = controller.state_from_address();
            match action {
                PageAction::Next => controller.next_page(current).await,
                PageAction::Prev if current.page > 1 => controller.prev_page(current).await,
                PageAction::Prev => controller.activate().await,
            }
        }
        None => controller.activate().await,
    };

    let page = shell::render_list::<E>(&document.lock(), &requested, &outcome)?;
    Ok(Html(page))
}

/// Redirect to the detail page of a random `E`
pub async fn random_page<E: EntityView>(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Redirect, AppError> {
    let requested = request_url(&state.public_url, &uri)?;
    let location = requested.join(E::KIND.list_path())?;
    let document = shell::list_document::<E>(location);
    let controller = ListController::<E>::new(state.client.clone(), document.clone());

    controller.random_entity().await?;

    let target = document
        .lock()
        .navigation()
        .map(|url| match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        })
        .ok_or_else(|| AppError::internal("no destination picked"))?;
    Ok(Redirect::to(&target))
}
