//! rmexplorer-core: Page controllers for the explorer
//!
//! Holds the in-memory page document, the shared page utilities (query
//! accessor, loading indicator, debouncer, entity search, navbar toggle),
//! HTML rendering, and the generic list and detail controllers that drive
//! a document from API responses.

pub mod address;
pub mod debounce;
pub mod detail;
pub mod dom;
pub mod error;
pub mod generation;
pub mod indicator;
pub mod list;
pub mod navbar;
pub mod render;
pub mod search;
pub mod state;

pub use debounce::Debouncer;
pub use detail::DetailController;
pub use dom::{Document, Element, SharedDocument};
pub use error::CoreError;
pub use generation::{Generation, Token};
pub use indicator::{LoadingGuard, LoadingIndicator};
pub use list::{ListController, SEARCH_DEBOUNCE};
pub use navbar::setup_navbar_toggle;
pub use render::{EntityView, RelatedView};
pub use search::{GENERIC_ERROR, SearchOutcome, search_entities};
pub use state::{DetailState, ListState, ViewPhase};
