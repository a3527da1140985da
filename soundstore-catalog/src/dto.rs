//! Externally visible request/response shapes
//!
//! These are distinct from the persisted entities in `models`. The field
//! correspondence between the two lives in `mapping`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::models::{Tag, TagId};

/// POST /sounds body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSoundDto {
    pub title: String,
    pub price: f64,
    /// Defaults to the time the request is handled
    #[serde(default)]
    pub uploaded_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rank: Option<i64>,
    /// Tag ids to attach; duplicates collapse
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
}

/// PUT /sounds/:id body
///
/// Carries no tag set: tag mutation on update is not supported.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSoundDto {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub uploaded_on: DateTime<Utc>,
    /// Left unchanged when omitted
    #[serde(default)]
    pub rank: Option<i64>,
}

/// Single-sound read shape (GET /sounds/:id, POST /sounds response)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadSoundDto {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub uploaded_on: DateTime<Utc>,
    pub rank: i64,
    pub tags: Vec<TagDto>,
}

/// List read shape (GET /sounds); tags are flattened to their labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSoundDto {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub uploaded_on: DateTime<Utc>,
    pub rank: i64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDto {
    pub id: TagId,
    pub label: String,
}

impl From<&Tag> for TagDto {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            label: tag.label.clone(),
        }
    }
}

/// POST /tags body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagDto {
    pub label: String,
}
