//! HTTP API handlers for the catalog

pub mod health;
pub mod sounds;
pub mod tags;
pub mod validation;

pub use health::health_routes;
pub use sounds::{create_sound, delete_sound, get_sound, list_sounds, update_sound};
pub use tags::{create_tag, list_tags};
