//! Page shell around the controller-driven documents

use askama::Template;
use rmexplorer_api::EntityKind;
use rmexplorer_core::dom::ids;
use rmexplorer_core::{
    Document, Element, EntityView, ListState, SEARCH_DEBOUNCE, SharedDocument, setup_navbar_toggle,
};
use url::Url;

const SITE_NAME: &str = "Rick and Morty Explorer";

struct NavLink {
    href: &'static str,
    label: &'static str,
    active: bool,
}

fn nav_links(active: Option<EntityKind>) -> Vec<NavLink> {
    EntityKind::ALL
        .into_iter()
        .map(|kind| NavLink {
            href: kind.list_path(),
            label: kind.plural(),
            active: active == Some(kind),
        })
        .collect()
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ title }}</title>
    {% match canonical %}{% when Some with (link) %}<link rel="canonical" href="{{ link.href }}" />
    <script>history.replaceState(null, "", {{ link.path_json|safe }});</script>
    {% when None %}{% endmatch %}
  </head>
  <body>
    <nav class="navbar">
      <a href="/" class="brand">Rick and Morty Explorer</a>
      <button id="menu-toggle" type="button" aria-label="Toggle menu">&#9776;</button>
      <ul id="menu-links" class="{{ menu_class }}">
        {% for link in nav %}<li><a href="{{ link.href }}"{% if link.active %} class="active"{% endif %}>{{ link.label }}</a></li>
        {% endfor %}
      </ul>
    </nav>
    <div id="spinner" class="spinner"{% if spinner_hidden %} hidden{% endif %}></div>
    <main>
{{ body|safe }}
    </main>
    <script>
      document.getElementById("menu-toggle").addEventListener("click", function () {
        document.getElementById("menu-links").classList.toggle("open");
      });
    </script>
  </body>
</html>"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    title: &'a str,
    canonical: Option<Canonical>,
    nav: Vec<NavLink>,
    menu_class: String,
    spinner_hidden: bool,
    body: &'a str,
}

/// Address the browser should show instead of the requested one
struct Canonical {
    href: String,
    /// Path and query as a JSON string literal
    path_json: String,
}

impl Canonical {
    /// `Some` when the controller moved the document away from `requested`
    fn between(requested: &Url, document: &Document) -> Option<Self> {
        let location = document.location();
        if location == requested {
            return None;
        }
        let path = match location.query() {
            Some(query) => format!("{}?{query}", location.path()),
            None => location.path().to_string(),
        };
        Some(Self {
            href: location.to_string(),
            path_json: serde_json::Value::String(path).to_string(),
        })
    }
}

#[derive(Template)]
#[template(
    source = r#"<section class="list-page">
  <h1>{{ heading }}</h1>
  <div class="controls">
    <form id="searchForm" method="get" action="{{ list_path }}">
      <input id="searchInput" type="search" name="name" value="{{ search_value }}" placeholder="Search {{ kind }}s..." autocomplete="off" />
    </form>
    <a id="{{ random_id }}" href="{{ random_href }}" class="random-btn">Random {{ kind }}</a>
  </div>
  <ul id="{{ grid_id }}" class="grid">
{{ grid|safe }}
  </ul>
  <form class="pagination" method="get" action="{{ list_path }}">
    <input type="hidden" name="page" value="{{ page }}" />
    <button id="prevBtn" type="submit" name="action" value="prev"{% if prev_disabled %} disabled{% endif %}>Previous</button>
    <span class="page-number">Page {{ page }}</span>
    <button id="nextBtn" type="submit" name="action" value="next"{% if next_disabled %} disabled{% endif %}>Next</button>
  </form>
</section>
<script>
  (function () {
    var form = document.getElementById("searchForm");
    var timer;
    document.getElementById("searchInput").addEventListener("input", function () {
      clearTimeout(timer);
      timer = setTimeout(function () { form.submit(); }, {{ debounce_ms }});
    });
  })();
</script>"#,
    ext = "html"
)]
struct ListBodyTemplate<'a> {
    heading: &'static str,
    kind: EntityKind,
    list_path: &'static str,
    search_value: &'a str,
    random_id: &'static str,
    random_href: String,
    grid_id: &'static str,
    grid: &'a str,
    page: u32,
    prev_disabled: bool,
    next_disabled: bool,
    debounce_ms: u128,
}

#[derive(Template)]
#[template(
    source = r#"<section class="detail-page">
  <a href="{{ back_href }}" class="back-link">All {{ plural }}</a>
  <div id="{{ detail_id }}" class="detail">
{{ detail|safe }}
  </div>
  <div id="{{ related_id }}" class="related">
{{ related|safe }}
  </div>
</section>"#,
    ext = "html"
)]
struct DetailBodyTemplate<'a> {
    back_href: &'static str,
    plural: &'static str,
    detail_id: &'static str,
    detail: &'a str,
    related_id: &'static str,
    related: &'a str,
}

fn new_document<'a>(location: Url, page_ids: impl IntoIterator<Item = &'a str>) -> SharedDocument {
    let mut document = Document::new(location)
        .with_elements([ids::SPINNER, ids::MENU_TOGGLE, ids::MENU_LINKS])
        .with_elements(page_ids);
    setup_navbar_toggle(&mut document);
    document.shared()
}

/// Document holding the elements of the list page of `E`
pub fn list_document<E: EntityView>(location: Url) -> SharedDocument {
    new_document(
        location,
        [
            E::GRID,
            E::RANDOM_TRIGGER,
            ids::PREV_BUTTON,
            ids::NEXT_BUTTON,
            ids::SEARCH_INPUT,
        ],
    )
}

/// Document holding the elements of the detail page of `E`
pub fn detail_document<E: EntityView>(location: Url) -> SharedDocument {
    new_document(location, [E::DETAIL, E::RELATED])
}

fn flag(document: &Document, id: &str, read: fn(&Element) -> bool) -> bool {
    document.element(id).is_some_and(read)
}

/// Wrap page-specific markup in the shared shell
///
/// # Errors
/// Returns an error if the template fails to render.
pub fn render_page(
    title: &str,
    active: Option<EntityKind>,
    document: Option<(&Document, &Url)>,
    body: &str,
) -> askama::Result<String> {
    let (canonical, menu_class, spinner_hidden) = match document {
        Some((document, requested)) => (
            Canonical::between(requested, document),
            document
                .element(ids::MENU_LINKS)
                .map(|links| links.classes().collect::<Vec<_>>().join(" "))
                .unwrap_or_default(),
            flag(document, ids::SPINNER, Element::is_hidden),
        ),
        None => (None, String::new(), true),
    };
    PageTemplate {
        title,
        canonical,
        nav: nav_links(active),
        menu_class,
        spinner_hidden,
        body,
    }
    .render()
}

/// Full list page of `E` from a driven document
///
/// # Errors
/// Returns an error if a template fails to render.
pub fn render_list<E: EntityView>(
    document: &Document,
    requested: &Url,
    state: &ListState,
) -> askama::Result<String> {
    let kind = E::KIND;
    let body = ListBodyTemplate {
        heading: kind.plural(),
        kind,
        list_path: kind.list_path(),
        search_value: state.query.as_deref().unwrap_or_default(),
        random_id: E::RANDOM_TRIGGER,
        random_href: format!("{}/random", kind.list_path()),
        grid_id: E::GRID,
        grid: document.inner_html(E::GRID),
        page: state.page,
        prev_disabled: flag(document, ids::PREV_BUTTON, Element::is_disabled),
        next_disabled: flag(document, ids::NEXT_BUTTON, Element::is_disabled),
        debounce_ms: SEARCH_DEBOUNCE.as_millis(),
    }
    .render()?;
    let title = format!("{} | {SITE_NAME}", kind.plural());
    render_page(&title, Some(kind), Some((document, requested)), &body)
}

/// Full detail page of `E` from a driven document
///
/// # Errors
/// Returns an error if a template fails to render.
pub fn render_detail<E: EntityView>(document: &Document, requested: &Url) -> askama::Result<String> {
    let kind = E::KIND;
    let body = DetailBodyTemplate {
        back_href: kind.list_path(),
        plural: kind.plural(),
        detail_id: E::DETAIL,
        detail: document.inner_html(E::DETAIL),
        related_id: E::RELATED,
        related: document.inner_html(E::RELATED),
    }
    .render()?;
    let title = match document.title() {
        "" => SITE_NAME.to_string(),
        name => format!("{name} | {SITE_NAME}"),
    };
    render_page(&title, Some(kind), Some((document, requested)), &body)
}
