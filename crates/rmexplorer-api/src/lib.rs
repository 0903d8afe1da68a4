//! rmexplorer-api: Shared data model for the Rick and Morty API
//!
//! Contains the entity kinds, entity records and collection page types
//! used by the client, the page controllers, and the server.

pub mod entities;
pub mod kind;
pub mod responses;

pub use entities::{Character, Entity, Episode, Location, ResourceRef, id_from_url};
pub use kind::EntityKind;
pub use responses::{CollectionPage, PageInfo};
