//! Global loading indicator

use crate::dom::{Document, SharedDocument, ids};
use crate::generation::Token;

/// Shows and hides the `spinner` element; absent element means no-op
pub struct LoadingIndicator;

impl LoadingIndicator {
    pub fn show(document: &mut Document) {
        document.set_hidden(ids::SPINNER, false);
    }

    pub fn hide(document: &mut Document) {
        document.set_hidden(ids::SPINNER, true);
    }
}

/// Shows the indicator for the lifetime of an action
///
/// Dropping the guard hides the indicator again unless a newer action has
/// taken over, so every exit path of the action clears it.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard {
    document: SharedDocument,
    token: Token,
}

impl LoadingGuard {
    pub fn show(document: &SharedDocument, token: Token) -> Self {
        LoadingIndicator::show(&mut document.lock());
        Self {
            document: SharedDocument::clone(document),
            token,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.token.is_current() {
            LoadingIndicator::hide(&mut self.document.lock());
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::generation::Generation;

    fn spinner_hidden(document: &SharedDocument) -> bool {
        document.lock().element(ids::SPINNER).unwrap().is_hidden()
    }

    #[test]
    fn test_absent_indicator_is_ignored() {
        let mut document = Document::new(Url::parse("http://localhost/").unwrap());
        LoadingIndicator::show(&mut document);
        LoadingIndicator::hide(&mut document);
        assert!(document.element(ids::SPINNER).is_none());
    }

    #[test]
    fn test_guard_hides_on_drop() {
        let document = Document::new(Url::parse("http://localhost/").unwrap())
            .with_elements([ids::SPINNER])
            .shared();
        let generation = Generation::new();

        let guard = LoadingGuard::show(&document, generation.begin());
        assert!(!spinner_hidden(&document));
        drop(guard);
        assert!(spinner_hidden(&document));
    }

    #[test]
    fn test_superseded_guard_leaves_indicator() {
        let document = Document::new(Url::parse("http://localhost/").unwrap())
            .with_elements([ids::SPINNER])
            .shared();
        let generation = Generation::new();

        let stale = LoadingGuard::show(&document, generation.begin());
        let current = LoadingGuard::show(&document, generation.begin());
        drop(stale);
        assert!(!spinner_hidden(&document));
        drop(current);
        assert!(spinner_hidden(&document));
    }
}
