//! Generic detail page controller
//!
//! Loads one entity, fans out to every related entity it references, and
//! renders both only once all requests have succeeded.

use std::marker::PhantomData;

use rmexplorer_client::HttpClient;
use tracing::{debug, instrument, warn};

use crate::dom::SharedDocument;
use crate::error::{CoreError, Result};
use crate::generation::Generation;
use crate::indicator::LoadingGuard;
use crate::render::{self, EntityView, RelatedView};
use crate::search::GENERIC_ERROR;
use crate::state::{DetailState, ViewPhase};

/// Everything a successful load writes to the document
struct DetailView {
    title: String,
    detail: String,
    related: String,
}

/// Drives the detail page of `E` in a shared document
#[derive(Debug, Clone)]
pub struct DetailController<E> {
    client: HttpClient,
    document: SharedDocument,
    generation: Generation,
    kind: PhantomData<fn() -> E>,
}

impl<E> DetailController<E>
where
    E: EntityView,
    E::Related: RelatedView,
{
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

    /// Inline message for a missing or unusable id
    #[must_use]
    pub fn invalid_id_message() -> String {
        format!("Invalid {} ID", E::KIND)
    }

    /// Id carried by the document's address
    ///
    /// # Errors
    /// Returns [`CoreError::MissingParameter`] when the parameter is absent
    /// and [`CoreError::InvalidParameter`] when it is not a positive integer.
    pub fn id_from_address(&self) -> Result<u32> {
        let name = E::KIND.id_param();
        let raw = self
            .document
            .lock()
            .query_param(name)
            .ok_or(CoreError::MissingParameter(name))?;
        match raw.trim().parse::<u32>() {
            Ok(id) if id >= 1 => Ok(id),
            _ => Err(CoreError::InvalidParameter { name, value: raw }),
        }
    }

    /// Initial render from the address; an unusable id never reaches the API
    pub async fn activate(&self) -> DetailState {
        match self.id_from_address() {
            Ok(id) => self.load(id).await,
            Err(err) => {
                debug!(%err, kind = %E::KIND, "no usable id in address");
                self.document
                    .lock()
                    .set_inner_html(E::DETAIL, render::error(&Self::invalid_id_message()));
                DetailState {
                    id: None,
                    phase: ViewPhase::ErrorShown,
                }
            }
        }
    }

    /// Fetch entity `id` and its related entities, then render them together
    #[instrument(skip(self), fields(kind = %E::KIND))]
    pub async fn load(&self, id: u32) -> DetailState {
        let token = self.generation.begin();
        let _guard = LoadingGuard::show(&self.document, token.clone());
        let mut state = DetailState {
            id: Some(id),
            phase: ViewPhase::Loading,
        };
        {
            let mut document = self.document.lock();
            document.set_inner_html(
                E::DETAIL,
                render::message(&format!("Loading {} details...", E::KIND)),
            );
            document.set_inner_html(E::RELATED, "");
        }

        let rendered = self.fetch(id, &mut state).await;
        if !token.is_current() {
            debug!("superseded, discarding entity");
            return state;
        }
        state.phase = self.commit(rendered);
        state
    }

    async fn fetch(&self, id: u32, state: &mut DetailState) -> Result<DetailView> {
        let entity = self.client.entity::<E>(id).await?;

        let urls = entity.related_urls();
        let related = if urls.is_empty() {
            Vec::new()
        } else {
            state.phase = ViewPhase::LoadingRelated;
            self.client.fetch_all::<E::Related>(urls).await?
        };

        Ok(DetailView {
            title: entity.name().to_string(),
            detail: entity.detail()?,
            related: render::related_section::<E>(&related)?,
        })
    }

    fn commit(&self, rendered: Result<DetailView>) -> ViewPhase {
        let mut document = self.document.lock();
        match rendered {
            Ok(view) => {
                document.set_title(view.title);
                document.set_inner_html(E::DETAIL, view.detail);
                document.set_inner_html(E::RELATED, view.related);
                ViewPhase::Rendered
            }
            Err(err) => {
                warn!(%err, "failed to load entity");
                document.set_inner_html(E::DETAIL, render::error(GENERIC_ERROR));
                document.set_inner_html(E::RELATED, "");
                ViewPhase::ErrorShown
            }
        }
    }
}
