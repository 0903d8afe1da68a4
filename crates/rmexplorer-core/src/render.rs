//! HTML rendering of entities
//!
//! Templates are auto-escaped; only hrefs built here from numeric ids are
//! marked safe.

use askama::Template;
use rmexplorer_api::{Character, Entity, Episode, Location, ResourceRef};
use tracing::warn;

/// How an entity kind appears on the list and detail pages
pub trait EntityView: Entity {
    /// Grid container on the list page
    const GRID: &'static str;
    /// Primary-field container on the detail page
    const DETAIL: &'static str;
    /// Related-entity container on the detail page
    const RELATED: &'static str;
    /// Random-entity trigger on the list page
    const RANDOM_TRIGGER: &'static str;
    /// Shown when a name search matches nothing
    const NOT_FOUND: &'static str;
    /// Heading above the related entities
    const RELATED_HEADING: &'static str;
    /// Shown instead of an empty related-entity collection
    const NONE_KNOWN: &'static str;

    /// Card in the list page grid
    ///
    /// # Errors
    /// Returns an error if the template fails to render.
    fn card(&self) -> askama::Result<String>;

    /// Primary-field block of the detail page
    ///
    /// # Errors
    /// Returns an error if the template fails to render.
    fn detail(&self) -> askama::Result<String>;
}

/// Kinds that appear as related entities on another kind's detail page
pub trait RelatedView: EntityView {
    /// Scrollable collection of these entities
    ///
    /// # Errors
    /// Returns an error if the template fails to render.
    fn related_panel(items: &[Self]) -> askama::Result<String>;
}

/// CSS hook derived from a status value (`Alive` → `alive`)
#[must_use]
pub fn status_class(status: &str) -> String {
    status.to_lowercase()
}

/// Location detail link for a character's origin or last location
#[must_use]
pub fn location_href(reference: &ResourceRef) -> String {
    reference
        .id()
        .map_or_else(|| "#".to_string(), |id| Location::KIND.detail_href(id))
}

/// Concatenated grid cards
///
/// # Errors
/// Returns an error if any card fails to render.
pub fn grid<E: EntityView>(items: &[E]) -> askama::Result<String> {
    items.iter().map(EntityView::card).collect()
}

#[derive(Template)]
#[template(
    source = r#"{% match class %}{% when Some with (css) %}<p class="{{ css }}">{{ text }}</p>{% when None %}<p>{{ text }}</p>{% endmatch %}"#,
    ext = "html"
)]
struct MessageTemplate<'a> {
    class: Option<&'a str>,
    text: &'a str,
}

impl MessageTemplate<'_> {
    /// Logs a template failure and yields an empty string
    fn render_or_empty(&self) -> String {
        self.render().unwrap_or_else(|err| {
            warn!(%err, text = self.text, "failed to render message");
            String::new()
        })
    }
}

/// Plain inline message
#[must_use]
pub fn message(text: &str) -> String {
    MessageTemplate { class: None, text }.render_or_empty()
}

/// Inline error message
#[must_use]
pub fn error(text: &str) -> String {
    MessageTemplate {
        class: Some("error"),
        text,
    }
    .render_or_empty()
}

#[derive(Template)]
#[template(
    source = r#"<h3>{{ heading }}:</h3>
{{ body|safe }}"#,
    ext = "html"
)]
struct RelatedSectionTemplate<'a> {
    heading: &'a str,
    body: &'a str,
}

/// Related-entity section of the detail page of an `E`
///
/// # Errors
/// Returns an error if the template fails to render.
pub fn related_section<E>(related: &[E::Related]) -> askama::Result<String>
where
    E: EntityView,
    E::Related: RelatedView,
{
    let body = if related.is_empty() {
        message(E::NONE_KNOWN)
    } else {
        <E::Related as RelatedView>::related_panel(related)?
    };
    RelatedSectionTemplate {
        heading: E::RELATED_HEADING,
        body: &body,
    }
    .render()
}

// Characters

#[derive(Template)]
#[template(
    source = r#"<li id="characterItem_{{ character.id }}" class="character-item">
  <img src="{{ character.image }}" alt="{{ character.name }}" />
  <h4><a href="{{ href|safe }}" class="character-link">{{ character.name }}</a></h4>
  <p>status: <span class="{{ status_class }}">{{ character.status }}</span></p>
  <p>species: {{ character.species }}</p>
</li>"#,
    ext = "html"
)]
struct CharacterCardTemplate<'a> {
    character: &'a Character,
    href: String,
    status_class: String,
}

#[derive(Template)]
#[template(
    source = r#"<div class="character-header">
  <img src="{{ character.image }}" alt="{{ character.name }}" />
  <div class="character-info">
    <h4>{{ character.name }}</h4>
    <p><strong>status:</strong> <span class="{{ status_class }}">{{ character.status }}</span></p>
    <p><strong>species:</strong> {{ character.species }}</p>
    <p><strong>gender:</strong> {{ character.gender }}</p>
    <p><a href="{{ origin_href|safe }}" class="location-link"><strong>origin:</strong> {{ character.origin.name }}</a></p>
    <p><a href="{{ location_href|safe }}" class="location-link"><strong>location:</strong> {{ character.location.name }}</a></p>
  </div>
</div>"#,
    ext = "html"
)]
struct CharacterDetailTemplate<'a> {
    character: &'a Character,
    status_class: String,
    origin_href: String,
    location_href: String,
}

#[derive(Template)]
#[template(
    source = r#"<div class="episode-characters-wrapper"><div class="carousel-wrapper">
{% for card in cards %}  <div class="character-card">
    <img src="{{ card.character.image }}" alt="{{ card.character.name }}" />
    <h4><a href="{{ card.href|safe }}" class="character-link">{{ card.character.name }}</a></h4>
    <p>Status: <span class="{{ card.status_class }}">{{ card.character.status }}</span></p>
    <p>Species: {{ card.character.species }}</p>
  </div>
{% endfor %}</div></div>"#,
    ext = "html"
)]
struct CharacterCarouselTemplate<'a> {
    cards: Vec<CharacterCardTemplate<'a>>,
}

impl<'a> CharacterCardTemplate<'a> {
    fn new(character: &'a Character) -> Self {
        Self {
            character,
            href: Character::KIND.detail_href(character.id),
            status_class: status_class(&character.status),
        }
    }
}

impl EntityView for Character {
    const GRID: &'static str = "gridElement";
    const DETAIL: &'static str = "characterDetail";
    const RELATED: &'static str = "characterEpisode";
    const RANDOM_TRIGGER: &'static str = "randomCharacter";
    const NOT_FOUND: &'static str = "No characters match your search";
    const RELATED_HEADING: &'static str = "Episodes";
    const NONE_KNOWN: &'static str = "No known episodes.";

    fn card(&self) -> askama::Result<String> {
        CharacterCardTemplate::new(self).render()
    }

    fn detail(&self) -> askama::Result<String> {
        CharacterDetailTemplate {
            character: self,
            status_class: status_class(&self.status),
            origin_href: location_href(&self.origin),
            location_href: location_href(&self.location),
        }
        .render()
    }
}

impl RelatedView for Character {
    fn related_panel(items: &[Self]) -> askama::Result<String> {
        CharacterCarouselTemplate {
            cards: items.iter().map(CharacterCardTemplate::new).collect(),
        }
        .render()
    }
}

// Episodes

#[derive(Template)]
#[template(
    source = r#"<li id="episodeItem_{{ episode.id }}" class="episode-item">
  <h4><a href="{{ href|safe }}" class="episode-link">{{ episode.name }}</a></h4>
  <p>{{ episode.episode }}</p>
  <p>air date: {{ episode.air_date }}</p>
</li>"#,
    ext = "html"
)]
struct EpisodeCardTemplate<'a> {
    episode: &'a Episode,
    href: String,
}

impl<'a> EpisodeCardTemplate<'a> {
    fn new(episode: &'a Episode) -> Self {
        Self {
            episode,
            href: Episode::KIND.detail_href(episode.id),
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"<div class="episode-info">
  <h4>{{ episode.name }}</h4>
  <p>{{ episode.episode }}</p>
  <p>air date: {{ episode.air_date }}</p>
</div>"#,
    ext = "html"
)]
struct EpisodeDetailTemplate<'a> {
    episode: &'a Episode,
}

#[derive(Template)]
#[template(
    source = r#"<ul class="episode-list">
{% for card in cards %}{{ card|safe }}
{% endfor %}</ul>"#,
    ext = "html"
)]
struct EpisodeListTemplate {
    cards: Vec<String>,
}

impl EntityView for Episode {
    const GRID: &'static str = "episodeContainer";
    const DETAIL: &'static str = "episodeDetail";
    const RELATED: &'static str = "episodeCharacter";
    const RANDOM_TRIGGER: &'static str = "randomEpisode";
    const NOT_FOUND: &'static str = "No episodes match your search";
    const RELATED_HEADING: &'static str = "Characters";
    const NONE_KNOWN: &'static str = "No known characters.";

    fn card(&self) -> askama::Result<String> {
        EpisodeCardTemplate::new(self).render()
    }

    fn detail(&self) -> askama::Result<String> {
        EpisodeDetailTemplate { episode: self }.render()
    }
}

impl RelatedView for Episode {
    fn related_panel(items: &[Self]) -> askama::Result<String> {
        let cards = items
            .iter()
            .map(|episode| EpisodeCardTemplate::new(episode).render())
            .collect::<askama::Result<Vec<_>>>()?;
        EpisodeListTemplate { cards }.render()
    }
}

// Locations

#[derive(Template)]
#[template(
    source = r#"<li id="locationItem_{{ location.id }}" class="location-item">
  <h4><a href="{{ href|safe }}" class="locations-link">{{ location.name }}</a></h4>
  <p>Type: {{ location.location_type }}</p>
  <p>Dimension: {{ location.dimension }}</p>
  <p>Residents: {{ location.residents.len() }}</p>
</li>"#,
    ext = "html"
)]
struct LocationCardTemplate<'a> {
    location: &'a Location,
    href: String,
}

#[derive(Template)]
#[template(
    source = r#"<div class="location-info">
  <h2>{{ location.name }}</h2>
  <p><strong>Type:</strong> {{ location.location_type }}</p>
  <p><strong>Dimension:</strong> {{ location.dimension }}</p>
</div>"#,
    ext = "html"
)]
struct LocationDetailTemplate<'a> {
    location: &'a Location,
}

impl EntityView for Location {
    const GRID: &'static str = "gridElement";
    const DETAIL: &'static str = "locationElement";
    const RELATED: &'static str = "locationResidents";
    const RANDOM_TRIGGER: &'static str = "randomLocation";
    const NOT_FOUND: &'static str = "No locations match your search";
    const RELATED_HEADING: &'static str = "Residents";
    const NONE_KNOWN: &'static str = "No known residents.";

    fn card(&self) -> askama::Result<String> {
        LocationCardTemplate {
            location: self,
            href: Location::KIND.detail_href(self.id),
        }
        .render()
    }

    fn detail(&self) -> askama::Result<String> {
        LocationDetailTemplate { location: self }.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: u32, status: &str) -> Character {
        Character {
            id,
            name: format!("Character {id}"),
            status: status.to_string(),
            species: "Human".to_string(),
            subtype: String::new(),
            gender: "Female".to_string(),
            image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
            origin: ResourceRef {
                name: "Earth (C-137)".to_string(),
                url: "https://rickandmortyapi.com/api/location/1".to_string(),
            },
            location: ResourceRef {
                name: "unknown".to_string(),
                url: String::new(),
            },
            episode: Vec::new(),
            url: String::new(),
            created: None,
        }
    }

    #[test]
    fn test_character_card_links_and_status_class() {
        let html = character(5, "Dead").card().unwrap();
        assert!(html.contains(r#"href="/character-detail?characterId=5""#));
        assert!(html.contains(r#"<span class="dead">Dead</span>"#));
    }

    #[test]
    fn test_character_detail_location_links() {
        let html = character(1, "Alive").detail().unwrap();
        assert!(html.contains(r#"href="/location-detail?locationId=1""#));
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_names_are_escaped() {
        let mut evil = character(2, "Alive");
        evil.name = "<script>alert(1)</script>".to_string();
        let html = evil.card().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_related_section_shows_none_known() {
        let html = related_section::<Location>(&[]).unwrap();
        assert!(html.contains("<h3>Residents:</h3>"));
        assert!(html.contains("<p>No known residents.</p>"));
    }

    #[test]
    fn test_location_card_counts_residents() {
        let location = Location {
            id: 3,
            name: "Citadel of Ricks".to_string(),
            location_type: "Space station".to_string(),
            dimension: "unknown".to_string(),
            residents: vec!["a".to_string(), "b".to_string()],
            url: String::new(),
            created: None,
        };
        let html = location.card().unwrap();
        assert!(html.contains("<p>Residents: 2</p>"));
        assert!(html.contains(r#"href="/location-detail?locationId=3""#));
    }

    #[test]
    fn test_error_message_markup() {
        assert_eq!(error("Invalid episode ID"), r#"<p class="error">Invalid episode ID</p>"#);
        assert_eq!(message("Searching..."), "<p>Searching...</p>");
    }

    #[test]
    fn test_messages_escape_text() {
        assert_eq!(error("<b>nope"), r#"<p class="error">&lt;b&gt;nope</p>"#);
    }

    #[test]
    fn test_character_panel_under_episode_heading() {
        let html =
            related_section::<Episode>(&[character(1, "Alive"), character(2, "Dead")]).unwrap();
        assert!(html.starts_with("<h3>Characters:</h3>"));
        assert!(html.contains(r#"href="/character-detail?characterId=1""#));
        assert!(html.contains(r#"href="/character-detail?characterId=2""#));
        assert!(html.contains(r#"<span class="dead">Dead</span>"#));
    }
}
