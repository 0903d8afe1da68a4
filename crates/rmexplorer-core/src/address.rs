//! Query parameters of the page address

use url::Url;

/// Page number parameter of list pages
pub const PAGE_PARAM: &str = "page";
/// Search query parameter of list pages
pub const NAME_PARAM: &str = "name";

/// Value of the query parameter `key`, if present
#[must_use]
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Page number carried by the address; anything unusable means page 1
#[must_use]
pub fn page_from(url: &Url) -> u32 {
    query_param(url, PAGE_PARAM)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Copy of `url` with `key` set to `value`, or removed when `value` is `None`
///
/// Other parameters keep their order; a replaced parameter keeps its slot.
#[must_use]
pub fn with_param(url: &Url, key: &str, value: Option<&str>) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != key)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    if let Some(value) = value {
        let slot = url
            .query_pairs()
            .position(|(name, _)| name == key)
            .unwrap_or(pairs.len())
            .min(pairs.len());
        pairs.insert(slot, (key.to_string(), value.to_string()));
    }

    let mut updated = url.clone();
    if pairs.is_empty() {
        updated.set_query(None);
    } else {
        updated.query_pairs_mut().clear().extend_pairs(pairs);
    }
    updated
}

/// Copy of `url` pointing at page `page`
#[must_use]
pub fn with_page(url: &Url, page: u32) -> Url {
    with_param(url, PAGE_PARAM, Some(&page.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_query_param() {
        let address = url("http://localhost/character-detail?characterId=42");
        assert_eq!(
            query_param(&address, "characterId").as_deref(),
            Some("42")
        );
        assert_eq!(query_param(&address, "episodeId"), None);
    }

    #[test]
    fn test_page_defaults_to_one() {
        assert_eq!(page_from(&url("http://localhost/characters")), 1);
        assert_eq!(page_from(&url("http://localhost/characters?page=abc")), 1);
        assert_eq!(page_from(&url("http://localhost/characters?page=0")), 1);
        assert_eq!(page_from(&url("http://localhost/characters?page=-3")), 1);
        assert_eq!(page_from(&url("http://localhost/characters?page=7")), 7);
    }

    #[test]
    fn test_with_page_keeps_other_params() {
        let address = url("http://localhost/characters?page=2&theme=dark");
        assert_eq!(
            with_page(&address, 3).as_str(),
            "http://localhost/characters?page=3&theme=dark"
        );
        assert_eq!(
            with_page(&url("http://localhost/episodes"), 1).as_str(),
            "http://localhost/episodes?page=1"
        );
    }

    #[test]
    fn test_with_param_removes() {
        let address = url("http://localhost/characters?page=2&name=rick");
        assert_eq!(
            with_param(&address, NAME_PARAM, None).as_str(),
            "http://localhost/characters?page=2"
        );
        assert_eq!(
            with_param(&url("http://localhost/characters?name=rick"), NAME_PARAM, None).as_str(),
            "http://localhost/characters"
        );
    }
}
