//! In-memory page document
//!
//! A [`Document`] stands in for the browser page a controller drives: named
//! elements with HTML content and a few flags, the document title, the
//! address bar with its history, and click handlers. Every write targets an
//! element by id and is a no-op when that element does not exist.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use crate::address;

/// Ids of elements shared by every page
pub mod ids {
    /// Global loading indicator
    pub const SPINNER: &str = "spinner";
    /// Previous-page button
    pub const PREV_BUTTON: &str = "prevBtn";
    /// Next-page button
    pub const NEXT_BUTTON: &str = "nextBtn";
    /// Search input on list pages
    pub const SEARCH_INPUT: &str = "searchInput";
    /// Navbar menu toggle button
    pub const MENU_TOGGLE: &str = "menu-toggle";
    /// Navbar menu links
    pub const MENU_LINKS: &str = "menu-links";
}

/// Document shared between a controller and its host
pub type SharedDocument = Arc<Mutex<Document>>;

type ClickHandler = Arc<dyn Fn(&mut Document) + Send + Sync>;

/// A named element of the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    inner_html: String,
    value: String,
    disabled: bool,
    hidden: bool,
    classes: BTreeSet<String>,
}

impl Element {
    #[must_use]
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Current value of an input element
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

/// The page a controller renders into
pub struct Document {
    location: Url,
    history: Vec<Url>,
    navigation: Option<Url>,
    title: String,
    elements: BTreeMap<String, Element>,
    handlers: HashMap<String, Vec<ClickHandler>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("location", &self.location.as_str())
            .field("title", &self.title)
            .field("elements", &self.elements)
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document at `location`
    #[must_use]
    pub fn new(location: Url) -> Self {
        Self {
            location,
            history: Vec::new(),
            navigation: None,
            title: String::new(),
            elements: BTreeMap::new(),
            handlers: HashMap::new(),
        }
    }

    /// Add empty elements with the given ids
    #[must_use]
    pub fn with_elements<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        for id in ids {
            self.insert(id);
        }
        self
    }

    /// Add an empty element, keeping an existing one untouched
    pub fn insert(&mut self, id: &str) {
        self.elements.entry(id.to_string()).or_default();
    }

    /// Wrap the document for sharing with a controller
    #[must_use]
    pub fn shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    // Address bar

    /// Current address
    #[must_use]
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Value of a query parameter of the current address
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        address::query_param(&self.location, key)
    }

    /// Replace the address without navigating, recording a history entry
    pub fn push_state(&mut self, url: Url) {
        let previous = std::mem::replace(&mut self.location, url);
        self.history.push(previous);
    }

    /// Addresses left behind by [`Document::push_state`], oldest first
    #[must_use]
    pub fn history(&self) -> &[Url] {
        &self.history
    }

    /// Request a full navigation to another page
    pub fn navigate(&mut self, url: Url) {
        self.navigation = Some(url);
    }

    /// Pending full navigation, if one was requested
    #[must_use]
    pub fn navigation(&self) -> Option<&Url> {
        self.navigation.as_ref()
    }

    // Title

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // Elements

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Inner HTML of an element, empty when absent
    #[must_use]
    pub fn inner_html(&self, id: &str) -> &str {
        self.element(id).map_or("", Element::inner_html)
    }

    /// Replace an element's content; returns whether the element exists
    pub fn set_inner_html(&mut self, id: &str, html: impl Into<String>) -> bool {
        self.update(id, |element| element.inner_html = html.into())
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        self.update(id, |element| element.value = value.into())
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> bool {
        self.update(id, |element| element.disabled = disabled)
    }

    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        self.update(id, |element| element.hidden = hidden)
    }

    /// Toggle a class; returns whether it is now present, `None` if absent
    pub fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool> {
        let element = self.elements.get_mut(id)?;
        if element.classes.remove(class) {
            Some(false)
        } else {
            element.classes.insert(class.to_string());
            Some(true)
        }
    }

    fn update(&mut self, id: &str, apply: impl FnOnce(&mut Element)) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                apply(element);
                true
            }
            None => false,
        }
    }

    // Events

    /// Attach a click handler; returns `false` when the element is absent
    pub fn on_click<F>(&mut self, id: &str, handler: F) -> bool
    where
        F: Fn(&mut Document) + Send + Sync + 'static,
    {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.handlers
            .entry(id.to_string())
            .or_default()
            .push(Arc::new(handler));
        true
    }

    /// Dispatch a click to the handlers of `id`, in registration order
    pub fn click(&mut self, id: &str) {
        let handlers = self.handlers.get(id).cloned().unwrap_or_default();
        for handler in handlers {
            handler(self);
        }
    }
}
