//! Entity kinds and their address conventions

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three resource types exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Character,
    Episode,
    Location,
}

impl EntityKind {
    /// All kinds, in navigation order
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Character,
        EntityKind::Episode,
        EntityKind::Location,
    ];

    /// Path segment of the collection on the API (`character`, ...)
    #[must_use]
    pub fn api_path(self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::Episode => "episode",
            EntityKind::Location => "location",
        }
    }

    /// Path of the list page served by the explorer
    #[must_use]
    pub fn list_path(self) -> &'static str {
        match self {
            EntityKind::Character => "/characters",
            EntityKind::Episode => "/episodes",
            EntityKind::Location => "/locations",
        }
    }

    /// Path of the detail page served by the explorer
    #[must_use]
    pub fn detail_path(self) -> &'static str {
        match self {
            EntityKind::Character => "/character-detail",
            EntityKind::Episode => "/episode-detail",
            EntityKind::Location => "/location-detail",
        }
    }

    /// Query parameter carrying the entity id on the detail page
    #[must_use]
    pub fn id_param(self) -> &'static str {
        match self {
            EntityKind::Character => "characterId",
            EntityKind::Episode => "episodeId",
            EntityKind::Location => "locationId",
        }
    }

    /// Plural label used in headings and navigation
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Character => "Characters",
            EntityKind::Episode => "Episodes",
            EntityKind::Location => "Locations",
        }
    }

    /// Relative link to the detail page of the entity with `id`
    #[must_use]
    pub fn detail_href(self, id: u32) -> String {
        format!("{}?{}={id}", self.detail_path(), self.id_param())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_href() {
        assert_eq!(
            EntityKind::Character.detail_href(7),
            "/character-detail?characterId=7"
        );
        assert_eq!(
            EntityKind::Location.detail_href(3),
            "/location-detail?locationId=3"
        );
    }

    #[test]
    fn test_display_matches_api_path() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string(), kind.api_path());
        }
    }
}
