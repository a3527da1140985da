//! Persisted entity model
//!
//! `Sound` and `Tag` mirror the `sounds`/`tags` tables. The many-to-many
//! association lives in `sound_tags` and is loaded into `Sound::tags`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Store-assigned tag identifier
pub type TagId = i64;

/// Classification label, persisted independently of sounds
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
}

/// Catalog entry for one audio sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sound {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub uploaded_on: DateTime<Utc>,
    /// Default list ordering key (descending)
    pub rank: i64,
    /// Order is irrelevant; never contains duplicates
    pub tags: Vec<Tag>,
}
