//! Collection responses returned by the API

use serde::{Deserialize, Serialize};

/// One page of a collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPage<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// Pagination metadata attached to every collection page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of entities in the collection
    pub count: u32,
    /// Total number of pages
    pub pages: u32,
    /// Full URL of the next page, `None` on the last page
    pub next: Option<String>,
    /// Full URL of the previous page, `None` on the first page
    pub prev: Option<String>,
}

impl PageInfo {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_null_links_disable_navigation() {
        let page: CollectionPage<serde_json::Value> = serde_json::from_value(json!({
            "info": { "count": 51, "pages": 3, "next": null, "prev": "https://rickandmortyapi.com/api/episode?page=2" },
            "results": []
        }))
        .unwrap();

        assert!(!page.info.has_next());
        assert!(page.info.has_prev());
        assert_eq!(page.info.count, 51);
    }
}
