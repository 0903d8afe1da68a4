//! Navbar menu toggle

use crate::dom::{Document, ids};

/// Class that marks the menu as expanded
pub const OPEN_CLASS: &str = "open";

/// Make `menu-toggle` show and hide `menu-links`
///
/// Returns `false` without wiring anything when the toggle is absent.
pub fn setup_navbar_toggle(document: &mut Document) -> bool {
    document.on_click(ids::MENU_TOGGLE, |document| {
        document.toggle_class(ids::MENU_LINKS, OPEN_CLASS);
    })
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_toggle_opens_and_closes_menu() {
        let mut document = Document::new(Url::parse("http://localhost/").unwrap())
            .with_elements([ids::MENU_TOGGLE, ids::MENU_LINKS]);
        assert!(setup_navbar_toggle(&mut document));

        document.click(ids::MENU_TOGGLE);
        assert!(document.element(ids::MENU_LINKS).unwrap().has_class(OPEN_CLASS));
        document.click(ids::MENU_TOGGLE);
        assert!(!document.element(ids::MENU_LINKS).unwrap().has_class(OPEN_CLASS));
    }

    #[test]
    fn test_missing_toggle_is_tolerated() {
        let mut document =
            Document::new(Url::parse("http://localhost/").unwrap()).with_elements([ids::MENU_LINKS]);
        assert!(!setup_navbar_toggle(&mut document));
        document.click(ids::MENU_TOGGLE);
        assert!(!document.element(ids::MENU_LINKS).unwrap().has_class(OPEN_CLASS));
    }
}
