//! Generic list page controller
//!
//! One controller drives the grid of a collection: the paged listing, the
//! pagination buttons, the name search and the random-entity jump. Every
//! action takes the current [`ListState`] and returns the next one.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rmexplorer_api::{CollectionPage, PageInfo};
use rmexplorer_client::HttpClient;
use tracing::{debug, info, instrument, warn};

use crate::address::{self, NAME_PARAM};
use crate::debounce::Debouncer;
use crate::dom::{SharedDocument, ids};
use crate::error::{CoreError, Result};
use crate::generation::Generation;
use crate::indicator::LoadingGuard;
use crate::render::{self, EntityView};
use crate::search::{GENERIC_ERROR, SearchOutcome, search_entities};
use crate::state::{ListState, ViewPhase};

/// Quiet period before a typed search query is sent
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Grid placeholder while a search is in flight
pub const SEARCHING: &str = "Searching...";

/// Drives the list page of `E` in a shared document
#[derive(Debug, Clone)]
pub struct ListController<E> {
    client: HttpClient,
    document: SharedDocument,
    generation: Generation,
    kind: PhantomData<fn() -> E>,
}

impl<E: EntityView> ListController<E> {
    pub fn new(client: HttpClient, document: SharedDocument) -> Self {
        Self {
            client,
            document,
            generation: Generation::new(),
            kind: PhantomData,
        }
    }

    #[must_use]
    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// State described by the document's current address
    #[must_use]
    pub fn state_from_address(&self) -> ListState {
        ListState::from_address(self.document.lock().location())
    }

    /// Initial render: the search from the address if any, else the page
    pub async fn activate(&self) -> ListState {
        let state = self.state_from_address();
        match state.query.clone() {
            Some(query) => {
                self.document.lock().set_value(ids::SEARCH_INPUT, query.as_str());
                self.search(state, query).await
            }
            None => self.load(state).await,
        }
    }

    /// Fetch and render page `state.page`
    ///
    /// A load superseded by a newer action returns without touching the
    /// document and leaves the phase at [`ViewPhase::Loading`].
    #[instrument(skip(self, state), fields(kind = %E::KIND, page = state.page))]
    pub async fn load(&self, mut state: ListState) -> ListState {
        let token = self.generation.begin();
        let _guard = LoadingGuard::show(&self.document, token.clone());
        state.phase = ViewPhase::Loading;

        let rendered = self.fetch_grid(state.page).await;
        if !token.is_current() {
            debug!("superseded, discarding page");
            return state;
        }
        state.phase = self.commit_page(rendered);
        state
    }

    /// Advance one page and reload
    pub async fn next_page(&self, mut state: ListState) -> ListState {
        state.page = state.page.saturating_add(1);
        self.leave_search(&mut state);
        self.sync_address(&state);
        self.load(state).await
    }

    /// Go back one page and reload; a no-op on page 1
    pub async fn prev_page(&self, mut state: ListState) -> ListState {
        if state.page <= 1 {
            debug!(kind = %E::KIND, "already on the first page");
            return state;
        }
        state.page -= 1;
        self.leave_search(&mut state);
        self.sync_address(&state);
        self.load(state).await
    }

    /// Replace the grid with the entities whose name matches `query`
    ///
    /// A blank query restores the paged listing. Results are not paginated,
    /// so both pagination buttons are disabled while they are shown.
    #[instrument(skip(self, state), fields(kind = %E::KIND))]
    pub async fn search(&self, mut state: ListState, query: String) -> ListState {
        let token = self.generation.begin();
        let query = query.trim().to_string();
        state.query = (!query.is_empty()).then(|| query.clone());
        state.phase = ViewPhase::Loading;
        self.sync_address(&state);

        let document = SharedDocument::clone(&self.document);
        let mut guard = None;
        let outcome = search_entities::<E, _>(&self.client, &query, E::NOT_FOUND, |loading| {
            if loading {
                document
                    .lock()
                    .set_inner_html(E::GRID, render::message(SEARCHING));
                guard = Some(LoadingGuard::show(&document, token.clone()));
            } else {
                drop(guard.take());
            }
        })
        .await;

        if !token.is_current() {
            debug!("superseded, discarding search results");
            return state;
        }
        match outcome {
            SearchOutcome::Cleared => self.load(state).await,
            SearchOutcome::Found(page) => {
                state.phase = self.commit_results(&page);
                state
            }
            SearchOutcome::Failed(message) => {
                self.commit_search_error(&message);
                state.phase = ViewPhase::ErrorShown;
                state
            }
        }
    }

    /// Search wrapper that waits for `delay` of quiet input
    ///
    /// `state` is read when the search starts and replaced with the outcome
    /// once it commits; superseded searches leave it alone.
    #[must_use]
    pub fn debounced_search(
        &self,
        state: Arc<Mutex<ListState>>,
        delay: Duration,
    ) -> Debouncer<String> {
        let controller = self.clone();
        Debouncer::new(delay, move |query: String| {
            let controller = controller.clone();
            let state = Arc::clone(&state);
            async move {
                let current = state.lock().clone();
                let next = controller.search(current, query).await;
                if next.phase != ViewPhase::Loading {
                    *state.lock() = next;
                }
            }
        })
    }

    /// Pick a random entity and navigate to its detail page
    ///
    /// # Errors
    /// Returns an error if the collection cannot be fetched or is empty.
    pub async fn random_entity(&self) -> Result<u32> {
        self.random_entity_with(&mut StdRng::from_entropy()).await
    }

    /// [`ListController::random_entity`] with a caller-supplied generator
    ///
    /// # Errors
    /// Returns an error if the collection cannot be fetched or is empty.
    #[instrument(skip_all, fields(kind = %E::KIND))]
    pub async fn random_entity_with<R: Rng + Send>(&self, rng: &mut R) -> Result<u32> {
        let token = self.generation.begin();
        let _guard = LoadingGuard::show(&self.document, token);

        let root = self.client.collection::<E>().await?;
        let count = root.info.count;
        if count == 0 {
            return Err(CoreError::EmptyCollection(E::KIND));
        }
        let id = rng.gen_range(1..=count);
        info!(id, count, "picked random entity");

        {
            let mut document = self.document.lock();
            let target = document.location().join(&E::KIND.detail_href(id))?;
            document.navigate(target);
        }
        Ok(id)
    }

    async fn fetch_grid(&self, page: u32) -> Result<(String, PageInfo)> {
        let page = self.client.page::<E>(page).await?;
        Ok((render::grid(&page.results)?, page.info))
    }

    fn commit_page(&self, rendered: Result<(String, PageInfo)>) -> ViewPhase {
        let mut document = self.document.lock();
        match rendered {
            Ok((html, info)) => {
                document.set_inner_html(E::GRID, html);
                document.set_disabled(ids::PREV_BUTTON, !info.has_prev());
                document.set_disabled(ids::NEXT_BUTTON, !info.has_next());
                ViewPhase::Rendered
            }
            Err(err) => {
                warn!(%err, "failed to load page");
                document.set_inner_html(E::GRID, render::error(GENERIC_ERROR));
                ViewPhase::ErrorShown
            }
        }
    }

    fn commit_results(&self, page: &CollectionPage<E>) -> ViewPhase {
        let mut document = self.document.lock();
        document.set_disabled(ids::PREV_BUTTON, true);
        document.set_disabled(ids::NEXT_BUTTON, true);
        match render::grid(&page.results) {
            Ok(html) => {
                document.set_inner_html(E::GRID, html);
                ViewPhase::Rendered
            }
            Err(err) => {
                warn!(%err, "failed to render search results");
                document.set_inner_html(E::GRID, render::error(GENERIC_ERROR));
                ViewPhase::ErrorShown
            }
        }
    }

    fn commit_search_error(&self, message: &str) {
        let mut document = self.document.lock();
        document.set_disabled(ids::PREV_BUTTON, true);
        document.set_disabled(ids::NEXT_BUTTON, true);
        document.set_inner_html(E::GRID, render::error(message));
    }

    fn leave_search(&self, state: &mut ListState) {
        if state.query.take().is_some() {
            self.document.lock().set_value(ids::SEARCH_INPUT, "");
        }
    }

    /// Write page and query back into the address bar
    fn sync_address(&self, state: &ListState) {
        let mut document = self.document.lock();
        let url = address::with_param(document.location(), NAME_PARAM, state.query.as_deref());
        let url = address::with_page(&url, state.page);
        if &url != document.location() {
            document.push_state(url);
        }
    }
}
