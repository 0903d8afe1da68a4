//! Entity records as served by the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::kind::EntityKind;

/// A record that can be fetched from one of the collection endpoints
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection this record belongs to
    const KIND: EntityKind;

    /// Record type referenced by [`Entity::related_urls`]
    type Related: Entity;

    fn id(&self) -> u32;

    /// Display name, also used as the document title on detail pages
    fn name(&self) -> &str;

    /// Reference URLs of the related records shown on the detail page
    fn related_urls(&self) -> &[String];
}

/// Named link to another resource (character origin and last location)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub name: String,
    /// Reference URL, empty when the resource is unknown
    #[serde(default)]
    pub url: String,
}

impl ResourceRef {
    /// Id of the referenced resource, if the URL carries one
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        id_from_url(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type", default)]
    pub subtype: String,
    pub gender: String,
    pub image: String,
    pub origin: ResourceRef,
    pub location: ResourceRef,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Entity for Character {
    const KIND: EntityKind = EntityKind::Character;
    type Related = Episode;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn related_urls(&self) -> &[String] {
        &self.episode
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    /// Season/episode code such as `S01E01`
    pub episode: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Entity for Episode {
    const KIND: EntityKind = EntityKind::Episode;
    type Related = Character;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn related_urls(&self) -> &[String] {
        &self.characters
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub location_type: String,
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Entity for Location {
    const KIND: EntityKind = EntityKind::Location;
    type Related = Character;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn related_urls(&self) -> &[String] {
        &self.residents
    }
}

/// Extract the trailing numeric id from a reference URL
///
/// `https://rickandmortyapi.com/api/location/3` yields `Some(3)`; the empty
/// string the API uses for unknown origins yields `None`.
#[must_use]
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}
