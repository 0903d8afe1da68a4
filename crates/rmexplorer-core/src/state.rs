//! Page controller state

use url::Url;

use crate::address;

/// Where a page is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Idle,
    /// Waiting for the primary request
    Loading,
    /// Waiting for the related-entity fan-out (detail pages)
    LoadingRelated,
    Rendered,
    ErrorShown,
}

/// State of a list page, passed into and returned from every action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    /// Current page, never below 1
    pub page: u32,
    /// Active name search, `None` for the paged listing
    pub query: Option<String>,
    pub phase: ViewPhase,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            query: None,
            phase: ViewPhase::Idle,
        }
    }
}

impl ListState {
    /// State described by a list page address
    #[must_use]
    pub fn from_address(url: &Url) -> Self {
        let query = address::query_param(url, address::NAME_PARAM)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            page: address::page_from(url),
            query,
            phase: ViewPhase::Idle,
        }
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.query.is_some()
    }
}

/// State of a detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailState {
    /// Id read from the address, `None` when missing or invalid
    pub id: Option<u32>,
    pub phase: ViewPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_state_from_address() {
        let url = Url::parse("http://localhost/episodes?page=3&name=%20pickle%20").unwrap();
        let state = ListState::from_address(&url);
        assert_eq!(state.page, 3);
        assert_eq!(state.query.as_deref(), Some("pickle"));
        assert!(state.is_searching());

        let blank = Url::parse("http://localhost/episodes?name=").unwrap();
        assert_eq!(ListState::from_address(&blank), ListState::default());
    }
}
